//! Incremental reveal of a filtered post list (infinite scroll)
//!
//! A [`Paginator`] shows the first `revealed_count * page_size` posts of the
//! filtered list. While more posts remain it keeps exactly one observation on
//! the last visible post; once that post is fully visible it reveals the next
//! increment and moves the observation to the new last post.

use super::category::filter_posts;
use super::surface::{IntersectionEvent, Surface, Ticket};
use super::ConfigError;
use crate::content::Post;

/// Posts revealed per increment
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Fraction of the last item that must be visible, 1.0 = fully visible
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Validated paginator configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginatorConfig {
    page_size: usize,
    threshold: f64,
}

impl PaginatorConfig {
    pub fn new(page_size: usize, threshold: f64) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize(page_size));
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        Ok(Self {
            page_size,
            threshold,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Observation state of a paginator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginatorState {
    /// Nothing observed: not rendered yet, or unmounted
    Idle,
    /// Observing the last visible post
    Watching,
    /// Every filtered post is visible
    Exhausted,
}

struct Subscription<H> {
    ticket: Ticket,
    handle: H,
}

/// Visible window over the posts of one category
pub struct Paginator<'a, S: Surface> {
    posts: &'a [Post],
    config: PaginatorConfig,
    surface: S,
    selected: String,
    filtered: Vec<&'a Post>,
    revealed: usize,
    state: PaginatorState,
    subscription: Option<Subscription<S::Handle>>,
    epoch: u64,
    mounted: bool,
}

impl<'a, S: Surface> Paginator<'a, S> {
    /// Mount a listing over `posts` showing `selected`
    pub fn mount(
        posts: &'a [Post],
        selected: impl Into<String>,
        config: PaginatorConfig,
        surface: S,
    ) -> Self {
        let selected = selected.into();
        let mut paginator = Self {
            posts,
            config,
            surface,
            filtered: filter_posts(posts, &selected),
            selected,
            revealed: 1,
            state: PaginatorState::Idle,
            subscription: None,
            epoch: 0,
            mounted: true,
        };
        paginator.evaluate();
        paginator
    }

    /// Switch category; always restarts from the first increment
    pub fn select_category(&mut self, category: impl Into<String>) {
        if !self.mounted {
            return;
        }
        self.release();
        self.selected = category.into();
        self.filtered = filter_posts(self.posts, &self.selected);
        self.revealed = 1;
        tracing::debug!(
            "Selected category {:?}: {} posts",
            self.selected,
            self.filtered.len()
        );
        self.evaluate();
    }

    /// Handle an intersection notification from the surface
    ///
    /// Returns true when it revealed another increment.
    pub fn on_intersection(&mut self, event: &IntersectionEvent) -> bool {
        if !self.mounted {
            tracing::debug!("Ignoring intersection after unmount");
            return false;
        }
        match &self.subscription {
            Some(sub) if sub.ticket == event.ticket => {}
            _ => {
                tracing::debug!("Ignoring stale intersection for {:?}", event.ticket.target);
                return false;
            }
        }
        if !event.is_intersecting || event.ratio < self.config.threshold {
            return false;
        }

        self.advance()
    }

    /// Reveal the next increment directly; no-op once exhausted
    pub fn reveal_next(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        self.advance()
    }

    /// Re-evaluate after the presentation layer re-rendered
    ///
    /// Registers the deferred observation if the surface could not observe
    /// before; never registers a second observation for the same target.
    pub fn refresh(&mut self) {
        self.evaluate();
    }

    /// Release the live observation; later notifications are ignored
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.release();
        self.mounted = false;
        self.state = PaginatorState::Idle;
        tracing::debug!("Paginator unmounted");
    }

    /// The visible window
    pub fn visible(&self) -> &[&'a Post] {
        &self.filtered[..self.visible_len()]
    }

    pub fn visible_len(&self) -> usize {
        self.window().min(self.filtered.len())
    }

    /// Every post of the selected category
    pub fn filtered(&self) -> &[&'a Post] {
        &self.filtered
    }

    pub fn state(&self) -> PaginatorState {
        self.state
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn selected_category(&self) -> &str {
        &self.selected
    }

    pub fn is_exhausted(&self) -> bool {
        self.window() >= self.filtered.len()
    }

    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn window(&self) -> usize {
        self.revealed.saturating_mul(self.config.page_size)
    }

    fn advance(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        // Observation is per element: the old target is released before the window grows
        self.release();
        self.revealed += 1;
        tracing::debug!(
            "Revealed increment {} ({}/{} posts)",
            self.revealed,
            self.visible_len(),
            self.filtered.len()
        );
        self.evaluate();
        true
    }

    fn evaluate(&mut self) {
        if !self.mounted {
            return;
        }
        if self.is_exhausted() {
            self.release();
            self.state = PaginatorState::Exhausted;
            return;
        }

        let last: &'a Post = self.filtered[self.visible_len() - 1];
        let target = &last.id;
        if let Some(sub) = &self.subscription {
            if &sub.ticket.target == target
                && sub.ticket.category == self.selected
                && sub.ticket.revealed_count == self.revealed
            {
                self.state = PaginatorState::Watching;
                return;
            }
        }

        self.release();
        self.epoch += 1;
        let ticket = Ticket {
            epoch: self.epoch,
            category: self.selected.clone(),
            revealed_count: self.revealed,
            target: target.clone(),
        };

        match self.surface.observe(&ticket, self.config.threshold) {
            Some(handle) => {
                tracing::debug!("Watching {:?}", ticket.target);
                self.subscription = Some(Subscription { ticket, handle });
                self.state = PaginatorState::Watching;
            }
            None => {
                tracing::debug!("{:?} not rendered yet, observation deferred", ticket.target);
                self.state = PaginatorState::Idle;
            }
        }
    }

    fn release(&mut self) {
        if let Some(sub) = self.subscription.take() {
            self.surface.unobserve(sub.handle);
        }
    }
}

impl<S: Surface> Drop for Paginator<'_, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
