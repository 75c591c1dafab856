use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket handed out when a query is issued. Only the ticket of the most
/// recently issued query is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

impl QueryTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Monotonic sequence counter for one logical query (for example a food
/// search box). Responses carrying a ticket older than the latest issued one
/// are stale and must be dropped.
#[derive(Debug, Default)]
pub struct QueryGeneration {
    latest: AtomicU64,
}

impl QueryGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_ticket(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let generation = QueryGeneration::new();
        let first = generation.next_ticket();
        assert!(generation.is_current(first));

        let second = generation.next_ticket();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert!(second > first);
    }
}
