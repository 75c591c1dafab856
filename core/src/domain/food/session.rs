use tokio::sync::RwLock;

use crate::domain::{
    common::generation::{QueryGeneration, QueryTicket},
    food::{
        ports::FoodService,
        value_objects::{FoodSearchResult, SearchFoodsInput},
    },
};

/// Holds the latest food search result of one interactive client.
///
/// Every search takes a ticket before hitting the catalog. When the response
/// comes back it is only stored if no newer search was issued meanwhile, so a
/// slow, superseded response never overwrites fresher results.
#[derive(Debug, Default)]
pub struct FoodSearchSession {
    generation: QueryGeneration,
    current: RwLock<FoodSearchResult>,
}

impl FoodSearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> QueryTicket {
        self.generation.next_ticket()
    }

    /// Stores `result` if `ticket` is still the latest one. Returns whether
    /// the result was applied.
    pub async fn complete(&self, ticket: QueryTicket, result: FoodSearchResult) -> bool {
        let mut current = self.current.write().await;
        // checked under the lock so two completions cannot both pass
        if !self.generation.is_current(ticket) {
            tracing::debug!(sequence = ticket.sequence(), "dropping stale food search response");
            return false;
        }
        *current = result;
        true
    }

    pub async fn search<S: FoodService>(&self, service: &S, input: SearchFoodsInput) -> bool {
        let ticket = self.begin();
        let result = service.search_foods(input).await;
        self.complete(ticket, result).await
    }

    pub async fn snapshot(&self) -> FoodSearchResult {
        self.current.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food::entities::{Food, FoodConfig, FoodVisibility, Nutrients};

    fn result_named(name: &str) -> FoodSearchResult {
        FoodSearchResult {
            foods: vec![
                Food::new(FoodConfig {
                    name: name.to_string(),
                    category: None,
                    nutrients: Nutrients::default(),
                    visibility: FoodVisibility::Public,
                    owner_id: None,
                })
                .unwrap(),
            ],
            categories: vec![],
            data_unavailable: false,
        }
    }

    #[tokio::test]
    async fn test_late_response_does_not_overwrite_newer_one() {
        let session = FoodSearchSession::new();

        let slow = session.begin();
        let fast = session.begin();

        assert!(session.complete(fast, result_named("rice")).await);
        assert!(!session.complete(slow, result_named("ri")).await);

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.foods[0].name, "rice");
    }
}
