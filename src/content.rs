//! Forum content model: sections, topics, and posts.
//!
//! Content is an in-process sample dataset; there is no network or
//! persistence layer. Topics carry the per-section flags the section
//! routes filter on, posts carry the flags the activation shortcuts
//! toggle.

use serde::Deserialize;

/// A navigable forum section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Route {
    Home,
    Latest,
    New,
    Unread,
    Starred,
    Categories,
    Top,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Latest,
        Route::New,
        Route::Unread,
        Route::Starred,
        Route::Categories,
        Route::Top,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Latest => "latest",
            Route::New => "new",
            Route::Unread => "unread",
            Route::Starred => "starred",
            Route::Categories => "categories",
            Route::Top => "top",
        }
    }

    pub fn from_name(name: &str) -> Option<Route> {
        Route::ALL
            .into_iter()
            .find(|r| r.label() == name.to_lowercase())
    }

    /// Position of this route within the section bar.
    pub fn index(&self) -> usize {
        Route::ALL.iter().position(|r| r == self).unwrap_or(0)
    }
}

/// Notification level for a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Muted,
    Regular,
    Tracking,
    Watching,
}

impl NotifyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotifyLevel::Muted => "muted",
            NotifyLevel::Regular => "regular",
            NotifyLevel::Tracking => "tracking",
            NotifyLevel::Watching => "watching",
        }
    }
}

/// A single post within a topic.
#[derive(Debug, Clone)]
pub struct Post {
    /// Stable post number within the topic, starting at 1.
    pub number: u64,
    pub author: String,
    pub body: Vec<String>,
    pub liked: bool,
    pub bookmarked: bool,
    pub flagged: bool,
    pub deleted: bool,
}

impl Post {
    pub fn new(number: u64, author: &str, body: &[&str]) -> Self {
        Self {
            number,
            author: author.to_string(),
            body: body.iter().map(|l| l.to_string()).collect(),
            liked: false,
            bookmarked: false,
            flagged: false,
            deleted: false,
        }
    }

    /// Rendered height in rows: author header, body lines, separator.
    pub fn height(&self) -> i64 {
        2 + self.body.len() as i64
    }
}

/// A forum topic with its posts.
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub is_new: bool,
    pub unread: bool,
    pub starred: bool,
    pub notify: NotifyLevel,
    pub posts: Vec<Post>,
}

impl Topic {
    /// Total likes across posts, used for the `top` section ordering.
    pub fn like_count(&self) -> usize {
        self.posts.iter().filter(|p| p.liked).count()
    }
}

/// The whole forum as rendered by the reader.
#[derive(Debug, Clone)]
pub struct Forum {
    pub topics: Vec<Topic>,
    pub notifications: Vec<String>,
}

impl Forum {
    pub fn topic(&self, id: u64) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn topic_mut(&mut self, id: u64) -> Option<&mut Topic> {
        self.topics.iter_mut().find(|t| t.id == id)
    }

    /// Topic indices visible in a section, in display order.
    ///
    /// `Categories` is not a topic list and returns nothing; the
    /// categories screen renders summaries instead.
    pub fn topics_for(&self, route: Route) -> Vec<usize> {
        let mut indices: Vec<usize> = match route {
            Route::Home | Route::Latest => (0..self.topics.len()).collect(),
            Route::New => self.indices_where(|t| t.is_new),
            Route::Unread => self.indices_where(|t| t.unread),
            Route::Starred => self.indices_where(|t| t.starred),
            Route::Top => (0..self.topics.len()).collect(),
            Route::Categories => vec![],
        };

        match route {
            // Latest-first for the feed sections
            Route::Home | Route::Latest | Route::New | Route::Unread | Route::Starred => {
                indices.sort_by(|a, b| self.topics[*b].id.cmp(&self.topics[*a].id));
            }
            Route::Top => {
                indices.sort_by(|a, b| {
                    self.topics[*b]
                        .like_count()
                        .cmp(&self.topics[*a].like_count())
                        .then(self.topics[*a].id.cmp(&self.topics[*b].id))
                });
            }
            Route::Categories => {}
        }

        indices
    }

    /// Category names with topic counts, for the categories screen.
    pub fn categories(&self) -> Vec<(String, usize)> {
        let mut names: Vec<String> = self.topics.iter().map(|t| t.category.clone()).collect();
        names.sort();
        names.dedup();
        names
            .into_iter()
            .map(|name| {
                let count = self.topics.iter().filter(|t| t.category == name).count();
                (name, count)
            })
            .collect()
    }

    fn indices_where(&self, pred: impl Fn(&Topic) -> bool) -> Vec<usize> {
        (0..self.topics.len())
            .filter(|&i| pred(&self.topics[i]))
            .collect()
    }

    /// Deterministic sample forum used when no other content source exists.
    ///
    /// Topic 1 is deliberately long so the post stream has to cloak posts
    /// outside its materialized window.
    pub fn sample() -> Self {
        let mut topics = vec![];

        let mut long_posts = vec![Post::new(
            1,
            "freya",
            &[
                "Welcome to the release retrospective thread.",
                "Reply below with anything that went sideways.",
            ],
        )];
        for n in 2..=40 {
            long_posts.push(Post::new(
                n,
                if n % 3 == 0 { "tomas" } else { "mira" },
                &[
                    "Following up on the point above,",
                    "the rollout window was tighter than planned.",
                ],
            ));
        }
        topics.push(Topic {
            id: 1,
            title: "Release retrospective: 2.4".to_string(),
            category: "meta".to_string(),
            is_new: false,
            unread: true,
            starred: false,
            notify: NotifyLevel::Tracking,
            posts: long_posts,
        });

        topics.push(Topic {
            id: 2,
            title: "Show your terminal setup".to_string(),
            category: "lounge".to_string(),
            is_new: false,
            unread: false,
            starred: true,
            notify: NotifyLevel::Regular,
            posts: vec![
                Post::new(1, "ines", &["Minimal, tiling, no bar."]),
                Post::new(2, "freya", &["Screenshots or it did not happen."]),
                Post::new(3, "tomas", &["Attached. Fonts are everything."]),
            ],
        });

        topics.push(Topic {
            id: 3,
            title: "Keyboard-only workflows".to_string(),
            category: "howto".to_string(),
            is_new: true,
            unread: true,
            starred: false,
            notify: NotifyLevel::Regular,
            posts: vec![
                Post::new(1, "mira", &["Collecting tricks for mouse-free days."]),
                Post::new(2, "ines", &["Chords beat single keys once you pass ten bindings."]),
            ],
        });

        topics.push(Topic {
            id: 4,
            title: "Forum search feels slow".to_string(),
            category: "meta".to_string(),
            is_new: true,
            unread: false,
            starred: false,
            notify: NotifyLevel::Regular,
            posts: vec![Post::new(1, "tomas", &["Anyone else seeing multi-second queries?"])],
        });

        let mut liked_topic = Topic {
            id: 5,
            title: "Annual plaintext appreciation thread".to_string(),
            category: "lounge".to_string(),
            is_new: false,
            unread: false,
            starred: true,
            notify: NotifyLevel::Watching,
            posts: vec![
                Post::new(1, "freya", &["It is that time of year again."]),
                Post::new(2, "mira", &["Plaintext never breaks."]),
                Post::new(3, "ines", &["Agreed, and it diffs."]),
            ],
        };
        for post in &mut liked_topic.posts {
            post.liked = true;
        }
        topics.push(liked_topic);

        Forum {
            topics,
            notifications: vec![
                "mira replied to 'Keyboard-only workflows'".to_string(),
                "freya mentioned you in 'Release retrospective: 2.4'".to_string(),
            ],
        }
    }
}
