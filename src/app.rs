//! Application state and the shortcut handlers that mutate it.
//!
//! Every handler is infallible: a shortcut pressed where it makes no
//! sense (no selection, wrong screen, empty list) does nothing. The only
//! user-visible outcome of a boundary condition is that nothing happened.

use crate::config::Config;
use crate::content::{Forum, Post, Route, Topic};
use crate::defer::DeferredQueue;
use crate::error::Result;
use crate::events::bindings::ClickTarget;
use crate::events::{Action, Binding, ChordTracker, KeyPress, Keymap};
use crate::log;
use crate::navigator::{
    Direction, ItemGeometry, ScrollEffect, SelectionNavigator, ViewSnapshot,
};

/// How many posts around the anchor a post stream materializes; the rest
/// render as one-row cloaked placeholders.
pub const MATERIALIZE_WINDOW: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Chord navigation
    Normal,
    /// Typing a topic search query
    Search,
    /// Help popup showing all bindings
    Help,
}

/// View state of a section's topic list.
#[derive(Debug, Clone)]
pub struct TopicListState {
    pub route: Route,
    pub selected: Option<usize>,
    pub scroll: i64,
}

impl TopicListState {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            selected: None,
            scroll: 0,
        }
    }
}

/// View state of an open topic's post stream.
#[derive(Debug, Clone)]
pub struct PostStreamState {
    pub topic_id: u64,
    pub selected: Option<usize>,
    pub scroll: i64,
    /// First materialized row index; the window extends
    /// `MATERIALIZE_WINDOW` rows from here.
    pub anchor: usize,
}

impl PostStreamState {
    pub fn new(topic_id: u64) -> Self {
        Self {
            topic_id,
            selected: None,
            scroll: 0,
            anchor: 0,
        }
    }
}

/// What the content area currently shows.
#[derive(Debug, Clone)]
pub enum Screen {
    Topics(TopicListState),
    Posts(PostStreamState),
    Categories,
}

impl Screen {
    /// Section bar entry this screen belongs to, if any.
    pub fn route(&self) -> Option<Route> {
        match self {
            Screen::Topics(list) => Some(list.route),
            Screen::Categories => Some(Route::Categories),
            Screen::Posts(_) => None,
        }
    }

    fn for_route(route: Route) -> Screen {
        match route {
            Route::Categories => Screen::Categories,
            other => Screen::Topics(TopicListState::new(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerKind {
    NewTopic,
    ReplyToTopic,
    ReplyToPost(u64),
    EditPost(u64),
}

/// A minimal reply/edit composer, rendered as a single line.
#[derive(Debug, Clone)]
pub struct Composer {
    pub kind: ComposerKind,
    pub quoted: Option<String>,
}

impl Composer {
    fn new(kind: ComposerKind) -> Self {
        Self { kind, quoted: None }
    }
}

/// One row of a post stream: a materialized post or a cloaked stand-in.
#[derive(Debug, Clone, Copy)]
pub struct StreamRow {
    /// Index into the topic's `posts` vec.
    pub post_index: usize,
    pub top: i64,
    pub height: i64,
    pub cloaked: bool,
}

/// Row geometry for a topic's post stream. Deleted posts do not render.
pub fn stream_rows(topic: &Topic, anchor: usize) -> Vec<StreamRow> {
    let mut rows = vec![];
    let mut top = 0;

    for (walk, (post_index, post)) in topic
        .posts
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.deleted)
        .enumerate()
    {
        let cloaked = walk < anchor || walk >= anchor + MATERIALIZE_WINDOW;
        let height = if cloaked { 1 } else { post.height() };
        rows.push(StreamRow {
            post_index,
            top,
            height,
            cloaked,
        });
        top += height;
    }

    rows
}

pub struct App {
    pub input_mode: InputMode,
    pub keymap: Keymap,
    chords: ChordTracker,
    navigator: SelectionNavigator,
    pub deferred: DeferredQueue,
    pub forum: Forum,
    pub screen: Screen,
    history: Vec<Screen>,
    pub viewport_height: i64,
    pub search_query: String,
    search_draft: String,
    pub composer: Option<Composer>,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let keymap = Keymap::resolve(&config.keybindings)?;
        Ok(Self {
            input_mode: InputMode::Normal,
            keymap,
            chords: ChordTracker::default(),
            navigator: SelectionNavigator::new(config.scroll_slack()),
            deferred: DeferredQueue::new(),
            forum: Forum::sample(),
            screen: Screen::for_route(config.default_section()),
            history: vec![],
            viewport_height: 24,
            search_query: String::new(),
            search_draft: String::new(),
            composer: None,
            status: String::new(),
            should_quit: false,
        })
    }

    /// Feed a key press to the chord tracker.
    pub fn press_chord(&mut self, press: KeyPress) -> Option<Binding> {
        self.chords.press(&self.keymap, press)
    }

    /// Pending chord prefix, for the status line indicator.
    pub fn pending_chord(&self) -> &[KeyPress] {
        self.chords.pending()
    }

    /// Topic indices shown for a section, after the search filter.
    pub fn visible_topics(&self, route: Route) -> Vec<usize> {
        let indices = self.forum.topics_for(route);
        if self.search_query.is_empty() {
            return indices;
        }
        let query = self.search_query.to_lowercase();
        indices
            .into_iter()
            .filter(|&i| self.forum.topics[i].title.to_lowercase().contains(&query))
            .collect()
    }

    /// Snapshot of the current selectable list, rebuilt from live state.
    ///
    /// Returns `None` when the screen has no selectable list (categories,
    /// or a vanished topic).
    pub fn snapshot(&self) -> Option<ViewSnapshot> {
        match &self.screen {
            Screen::Topics(list) => {
                let ids = self.visible_topics(list.route);
                let items = ids
                    .iter()
                    .enumerate()
                    .map(|(i, _)| ItemGeometry {
                        top: i as i64,
                        height: 1,
                        selected: list.selected == Some(i),
                        external_id: None,
                    })
                    .collect();
                Some(ViewSnapshot {
                    items,
                    scroll_offset: list.scroll,
                    viewport_height: self.viewport_height,
                })
            }
            Screen::Posts(stream) => {
                let topic = self.forum.topic(stream.topic_id)?;
                let items = stream_rows(topic, stream.anchor)
                    .iter()
                    .enumerate()
                    .map(|(walk, row)| ItemGeometry {
                        top: row.top,
                        height: row.height,
                        selected: stream.selected == Some(walk),
                        external_id: row
                            .cloaked
                            .then(|| topic.posts[row.post_index].number),
                    })
                    .collect();
                Some(ViewSnapshot {
                    items,
                    scroll_offset: stream.scroll,
                    viewport_height: self.viewport_height,
                })
            }
            Screen::Categories => None,
        }
    }

    /// Process a user intent.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,

            Action::RouteTo(route) => self.route_to(route),
            Action::GoBack => self.go_back(),
            Action::NextSection => self.change_section(1),
            Action::PrevSection => self.change_section(-1),

            Action::SelectDown => self.move_selection(Direction::Next),
            Action::SelectUp => self.move_selection(Direction::Previous),
            Action::GoToFirstPost => self.go_to_first_post(),
            Action::GoToLastPost => self.go_to_last_post(),
            Action::MarkSelected(index) => self.mark_selected(index),

            Action::Activate(target) => self.activate(target),
            Action::QuoteReply => self.quote_reply(),
            Action::InsertQuote => self.insert_quote(),

            Action::ShowSearch => {
                self.input_mode = InputMode::Search;
                self.search_draft = self.search_query.clone();
            }
            Action::SearchInputChar(c) => self.search_draft.push(c),
            Action::SearchBackspace => {
                self.search_draft.pop();
            }
            Action::SubmitSearch => {
                self.search_query = std::mem::take(&mut self.search_draft);
                self.input_mode = InputMode::Normal;
                // The filter changed; old indices no longer apply
                if let Screen::Topics(list) = &mut self.screen {
                    list.selected = None;
                    list.scroll = 0;
                }
                log::log_event(&format!("search: '{}'", self.search_query));
            }
            Action::CancelSearch => {
                self.search_draft.clear();
                self.input_mode = InputMode::Normal;
            }

            Action::ShowHelp => self.input_mode = InputMode::Help,
            Action::CloseHelp => self.input_mode = InputMode::Normal,

            Action::CloseComposer => self.composer = None,
        }
    }

    /// Current draft of the search query while typing.
    pub fn search_draft(&self) -> &str {
        &self.search_draft
    }

    // === Navigation handlers ===

    fn route_to(&mut self, route: Route) {
        log::log_event(&format!("route to /{}", route.label()));
        let previous = std::mem::replace(&mut self.screen, Screen::for_route(route));
        self.history.push(previous);
        self.status.clear();
    }

    fn go_back(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.screen = previous;
        }
    }

    fn change_section(&mut self, delta: i64) {
        let Some(route) = self.screen.route() else {
            return;
        };
        let index = route.index() as i64 + delta;
        // Clamped at both ends: section switching does not wrap
        if index < 0 || index >= Route::ALL.len() as i64 {
            return;
        }
        self.route_to(Route::ALL[index as usize]);
    }

    // === Selection handlers ===

    fn move_selection(&mut self, direction: Direction) {
        let Some(view) = self.snapshot() else {
            return;
        };
        let Some(mv) = self.navigator.move_selection(&view, direction) else {
            return;
        };

        self.clear_selection();

        match mv.effect {
            Some(ScrollEffect::JumpToExternal(id)) => {
                // The jump re-anchors the stream and establishes the
                // selection itself; row indices change underneath it
                self.jump_to_post(id);
                return;
            }
            Some(ScrollEffect::ScrollTo(offset)) => {
                let content = view
                    .items
                    .last()
                    .map(|item| item.top + item.height)
                    .unwrap_or(0);
                let max = (content - view.viewport_height).max(0);
                self.set_scroll(offset.clamp(0, max));
            }
            None => {}
        }

        self.deferred.push(Action::MarkSelected(mv.select));
    }

    fn mark_selected(&mut self, index: usize) {
        let count = self.snapshot().map(|view| view.items.len()).unwrap_or(0);
        if index >= count {
            return;
        }
        match &mut self.screen {
            Screen::Topics(list) => list.selected = Some(index),
            Screen::Posts(stream) => stream.selected = Some(index),
            Screen::Categories => {}
        }
    }

    fn clear_selection(&mut self) {
        match &mut self.screen {
            Screen::Topics(list) => list.selected = None,
            Screen::Posts(stream) => stream.selected = None,
            Screen::Categories => {}
        }
    }

    fn set_scroll(&mut self, offset: i64) {
        match &mut self.screen {
            Screen::Topics(list) => list.scroll = offset,
            Screen::Posts(stream) => stream.scroll = offset,
            Screen::Categories => {}
        }
    }

    /// Re-anchor the post stream on a post number and select it.
    ///
    /// Silent no-op when the current screen is not a post stream or the
    /// number does not exist (a malformed cloak marker must not surface).
    fn jump_to_post(&mut self, number: u64) {
        let Screen::Posts(stream) = &self.screen else {
            return;
        };
        let topic_id = stream.topic_id;
        let Some(topic) = self.forum.topic(topic_id) else {
            return;
        };

        let Some(walk) = topic
            .posts
            .iter()
            .filter(|p| !p.deleted)
            .position(|p| p.number == number)
        else {
            return;
        };

        let anchor = walk.saturating_sub(MATERIALIZE_WINDOW / 2);
        let rows = stream_rows(topic, anchor);
        let content = rows.last().map(|row| row.top + row.height).unwrap_or(0);
        let max = (content - self.viewport_height).max(0);
        let top = rows[walk].top.min(max);

        if let Screen::Posts(stream) = &mut self.screen {
            stream.anchor = anchor;
            stream.selected = Some(walk);
            stream.scroll = top;
        }
        log::log_event(&format!("jump to post {} in topic {}", number, topic_id));
    }

    fn go_to_first_post(&mut self) {
        if let Some(number) = self.edge_post_number(true) {
            self.jump_to_post(number);
        }
    }

    fn go_to_last_post(&mut self) {
        if let Some(number) = self.edge_post_number(false) {
            self.jump_to_post(number);
        }
    }

    fn edge_post_number(&self, first: bool) -> Option<u64> {
        let Screen::Posts(stream) = &self.screen else {
            return None;
        };
        let topic = self.forum.topic(stream.topic_id)?;
        let mut live = topic.posts.iter().filter(|p| !p.deleted);
        if first {
            live.next().map(|p| p.number)
        } else {
            live.last().map(|p| p.number)
        }
    }

    // === Element activation ===

    fn activate(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::BookmarkPost => {
                if let Some(post) = self.selected_post_mut() {
                    post.bookmarked = !post.bookmarked;
                    let on = post.bookmarked;
                    self.status = if on {
                        "Bookmarked".to_string()
                    } else {
                        "Bookmark removed".to_string()
                    };
                }
            }
            ClickTarget::LikePost => {
                if let Some(post) = self.selected_post_mut() {
                    post.liked = !post.liked;
                }
            }
            ClickTarget::FlagPost => {
                if let Some(post) = self.selected_post_mut() {
                    post.flagged = true;
                    self.status = "Post flagged".to_string();
                }
            }
            ClickTarget::DeletePost => {
                if let Some(post) = self.selected_post_mut() {
                    post.deleted = true;
                    // Row indices shift once a post stops rendering
                    self.clear_selection();
                }
            }
            ClickTarget::EditPost => {
                if let Some((_, number)) = self.selected_post_loc() {
                    self.composer = Some(Composer::new(ComposerKind::EditPost(number)));
                }
            }
            ClickTarget::ReplyToPost => {
                if let Some((_, number)) = self.selected_post_loc() {
                    self.composer = Some(Composer::new(ComposerKind::ReplyToPost(number)));
                }
            }
            ClickTarget::SharePost => {
                if let Some((topic_id, number)) = self.selected_post_loc() {
                    self.status = format!("Copied link: /t/{}/{}", topic_id, number);
                }
            }
            ClickTarget::ShareTopic => {
                if let Some(id) = self.current_topic_id() {
                    self.status = format!("Copied link: /t/{}", id);
                }
            }
            ClickTarget::StarTopic => {
                if let Some(topic) = self.current_topic_mut() {
                    topic.starred = !topic.starred;
                }
            }
            ClickTarget::Notify(level) => {
                if let Screen::Posts(stream) = &self.screen {
                    let topic_id = stream.topic_id;
                    if let Some(topic) = self.forum.topic_mut(topic_id) {
                        topic.notify = level;
                        self.status = format!("Topic set to {}", level.label());
                    }
                }
            }
            ClickTarget::Notifications => {
                self.status = match self.forum.notifications.first() {
                    Some(latest) => format!(
                        "{} notifications. Latest: {}",
                        self.forum.notifications.len(),
                        latest
                    ),
                    None => "No notifications".to_string(),
                };
            }
            ClickTarget::OpenTopic => self.open_selected_topic(),
            ClickTarget::CreateTopic => {
                self.composer = Some(Composer::new(ComposerKind::NewTopic));
            }
            ClickTarget::ReplyToTopic => {
                if matches!(self.screen, Screen::Posts(_)) {
                    self.composer = Some(Composer::new(ComposerKind::ReplyToTopic));
                }
            }
        }
    }

    fn open_selected_topic(&mut self) {
        let Screen::Topics(list) = &self.screen else {
            return;
        };
        let Some(selected) = list.selected else {
            return;
        };
        let Some(&topic_index) = self.visible_topics(list.route).get(selected) else {
            return;
        };
        let topic_id = self.forum.topics[topic_index].id;

        log::log_event(&format!("open topic {}", topic_id));
        let previous =
            std::mem::replace(&mut self.screen, Screen::Posts(PostStreamState::new(topic_id)));
        self.history.push(previous);
    }

    fn quote_reply(&mut self) {
        self.activate(ClickTarget::ReplyToPost);
        if self.composer.is_some() {
            // Quote insertion runs after this event, in defined order
            self.deferred.push(Action::InsertQuote);
        }
    }

    fn insert_quote(&mut self) {
        let quoted = self
            .selected_post()
            .map(|(_, post)| format!("{}: {}", post.author, post.body.join(" ")));
        if let (Some(composer), Some(text)) = (self.composer.as_mut(), quoted) {
            composer.quoted = Some(text);
        }
    }

    // === Selection accessors ===

    /// Topic the screen is about: the open one, or the selected row.
    fn current_topic_id(&self) -> Option<u64> {
        match &self.screen {
            Screen::Posts(stream) => Some(stream.topic_id),
            Screen::Topics(list) => {
                let selected = list.selected?;
                let topic_index = *self.visible_topics(list.route).get(selected)?;
                Some(self.forum.topics[topic_index].id)
            }
            Screen::Categories => None,
        }
    }

    fn current_topic_mut(&mut self) -> Option<&mut Topic> {
        let topic_id = self.current_topic_id()?;
        self.forum.topic_mut(topic_id)
    }

    /// `(topic id, post number)` of the selected, materialized post.
    fn selected_post_loc(&self) -> Option<(u64, u64)> {
        let Screen::Posts(stream) = &self.screen else {
            return None;
        };
        let topic = self.forum.topic(stream.topic_id)?;
        let row = *stream_rows(topic, stream.anchor).get(stream.selected?)?;
        if row.cloaked {
            return None;
        }
        Some((topic.id, topic.posts[row.post_index].number))
    }

    pub fn selected_post(&self) -> Option<(&Topic, &Post)> {
        let Screen::Posts(stream) = &self.screen else {
            return None;
        };
        let topic = self.forum.topic(stream.topic_id)?;
        let row = *stream_rows(topic, stream.anchor).get(stream.selected?)?;
        Some((topic, &topic.posts[row.post_index]))
    }

    fn selected_post_mut(&mut self) -> Option<&mut Post> {
        let (topic_id, number) = self.selected_post_loc()?;
        self.forum
            .topic_mut(topic_id)?
            .posts
            .iter_mut()
            .find(|p| p.number == number)
    }
}
