//! Rendering surface seam: where intersection observations are registered

/// Snapshot of the paginator taken when an observation is registered
///
/// The surface hands the ticket back with every intersection notification;
/// the paginator only honors a notification whose ticket matches the live
/// subscription, so callbacks that outlive a category change or an unmount
/// are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Registration sequence number, unique per paginator instance
    pub epoch: u64,
    /// Category selected at registration time
    pub category: String,
    /// Reveal count at registration time
    pub revealed_count: usize,
    /// Id of the observed (last visible) post
    pub target: String,
}

/// Notification that an observed item crossed into view
#[derive(Debug, Clone)]
pub struct IntersectionEvent {
    pub ticket: Ticket,
    pub is_intersecting: bool,
    /// Visible fraction of the target, 0.0..=1.0
    pub ratio: f64,
}

impl IntersectionEvent {
    /// The target is completely in view
    pub fn fully_visible(ticket: Ticket) -> Self {
        Self {
            ticket,
            is_intersecting: true,
            ratio: 1.0,
        }
    }
}

/// The presentation layer's observation mechanism
pub trait Surface {
    /// Token returned by a successful registration
    type Handle;

    /// Start observing `ticket.target`. `None` means the item is not rendered
    /// yet; the paginator retries on its next recomputation.
    fn observe(&mut self, ticket: &Ticket, threshold: f64) -> Option<Self::Handle>;

    /// Stop observing; called exactly once per handle
    fn unobserve(&mut self, handle: Self::Handle);
}

/// Surface without a render tree: every item counts as rendered
///
/// Used by the CLI to simulate a reader scrolling to the bottom of the list.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_handle: u64,
    live: Vec<(u64, Ticket)>,
    registrations: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tickets currently being observed
    pub fn live(&self) -> impl Iterator<Item = &Ticket> {
        self.live.iter().map(|(_, ticket)| ticket)
    }

    /// Number of registrations made so far
    pub fn registrations(&self) -> usize {
        self.registrations
    }

    /// The event a reader would trigger by scrolling the newest observed item fully into view
    pub fn scroll_to_end(&self) -> Option<IntersectionEvent> {
        self.live
            .last()
            .map(|(_, ticket)| IntersectionEvent::fully_visible(ticket.clone()))
    }
}

impl Surface for HeadlessSurface {
    type Handle = u64;

    fn observe(&mut self, ticket: &Ticket, _threshold: f64) -> Option<u64> {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.registrations += 1;
        self.live.push((handle, ticket.clone()));
        Some(handle)
    }

    fn unobserve(&mut self, handle: u64) {
        self.live.retain(|(h, _)| *h != handle);
    }
}
