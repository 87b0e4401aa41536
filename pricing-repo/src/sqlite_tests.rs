//! SQLite store integration tests.

#[cfg(test)]
mod tests {
    use currency_locale::CurrencyCode;
    use pricing_types::{
        CreateLotRequest, LotId, RateStore, SetLotPricingRequest, StoreError,
    };

    use crate::SqliteStore;

    async fn setup_store() -> SqliteStore {
        SqliteStore::new("sqlite::memory:").await.unwrap()
    }

    fn lot_request(name: &str, airport: &str, miles: f64) -> CreateLotRequest {
        CreateLotRequest {
            name: name.to_string(),
            airport_code: airport.to_string(),
            distance_miles: miles,
        }
    }

    #[tokio::test]
    async fn test_save_and_get_active_rate() {
        let store = setup_store().await;

        let saved = store
            .save_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.79, "open-rates")
            .await
            .unwrap();
        assert!(saved.is_active);

        let fetched = store
            .get_active_rate(CurrencyCode::USD, CurrencyCode::GBP)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.rate, 0.79);
        assert_eq!(fetched.provider, "open-rates");
        assert!(fetched.is_active);
    }

    #[tokio::test]
    async fn test_get_active_rate_miss() {
        let store = setup_store().await;

        let result = store
            .get_active_rate(CurrencyCode::EUR, CurrencyCode::GBP)
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_supersede_keeps_single_active_row() {
        let store = setup_store().await;

        store
            .save_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.79, "open-rates")
            .await
            .unwrap();
        store
            .save_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.81, "open-rates")
            .await
            .unwrap();

        let active = store
            .get_active_rate(CurrencyCode::USD, CurrencyCode::GBP)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.rate, 0.81);

        // Old row is kept as history, deactivated rather than deleted.
        let history = store
            .rate_history(CurrencyCode::USD, CurrencyCode::GBP)
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().filter(|r| r.is_active).count(), 1);
    }

    #[tokio::test]
    async fn test_supersede_does_not_touch_other_pairs() {
        let store = setup_store().await;

        store
            .save_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.79, "open-rates")
            .await
            .unwrap();
        store
            .save_rate(CurrencyCode::USD, CurrencyCode::EUR, 0.92, "open-rates")
            .await
            .unwrap();
        store
            .save_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.81, "open-rates")
            .await
            .unwrap();

        let eur = store
            .get_active_rate(CurrencyCode::USD, CurrencyCode::EUR)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(eur.rate, 0.92);
        assert!(eur.is_active);
    }

    #[tokio::test]
    async fn test_non_positive_rate_rejected() {
        let store = setup_store().await;

        let result = store
            .save_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.0, "open-rates")
            .await;

        assert!(matches!(result, Err(StoreError::Domain(_))));
    }

    #[tokio::test]
    async fn test_list_active_rates_for_base() {
        let store = setup_store().await;

        store
            .save_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.79, "open-rates")
            .await
            .unwrap();
        store
            .save_rate(CurrencyCode::USD, CurrencyCode::EUR, 0.92, "open-rates")
            .await
            .unwrap();
        store
            .save_rate(CurrencyCode::GBP, CurrencyCode::USD, 1.27, "open-rates")
            .await
            .unwrap();

        let rates = store.list_active_rates(CurrencyCode::USD).await.unwrap();

        assert_eq!(rates.len(), 2);
        assert!(rates.iter().all(|r| r.base_currency == CurrencyCode::USD));
    }

    #[tokio::test]
    async fn test_create_and_search_lots() {
        let store = setup_store().await;

        store
            .create_lot(lot_request("Long Stay A", "LHR", 5.0))
            .await
            .unwrap();
        store
            .create_lot(lot_request("Meet & Greet", "lhr", 0.5))
            .await
            .unwrap();
        store
            .create_lot(lot_request("Economy", "JFK", 3.0))
            .await
            .unwrap();

        let lots = store.search_lots("LHR").await.unwrap();

        assert_eq!(lots.len(), 2);
        // Nearest first
        assert_eq!(lots[0].name, "Meet & Greet");
    }

    #[tokio::test]
    async fn test_lot_validation() {
        let store = setup_store().await;

        let result = store.create_lot(lot_request("", "LHR", 1.0)).await;
        assert!(matches!(result, Err(StoreError::Domain(_))));

        let result = store.create_lot(lot_request("Lot", "HEATHROW", 1.0)).await;
        assert!(matches!(result, Err(StoreError::Domain(_))));
    }

    #[tokio::test]
    async fn test_set_and_get_lot_pricing() {
        let store = setup_store().await;

        let lot = store
            .create_lot(lot_request("Long Stay A", "LHR", 5.0))
            .await
            .unwrap();

        store
            .set_lot_pricing(
                lot.id,
                SetLotPricingRequest {
                    currency: CurrencyCode::GBP,
                    region: "gb".to_string(),
                    daily_price: 14.99,
                    weekly_price: 79.99,
                },
            )
            .await
            .unwrap();

        let pricing = store
            .get_lot_pricing(lot.id, CurrencyCode::GBP, "GB")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(pricing.daily_price, 14.99);
        assert_eq!(pricing.region, "GB");

        // Different currency/region: no row
        let miss = store
            .get_lot_pricing(lot.id, CurrencyCode::USD, "US")
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_set_lot_pricing_replaces_existing_row() {
        let store = setup_store().await;

        let lot = store
            .create_lot(lot_request("Long Stay A", "LHR", 5.0))
            .await
            .unwrap();

        for price in [14.99, 12.49] {
            store
                .set_lot_pricing(
                    lot.id,
                    SetLotPricingRequest {
                        currency: CurrencyCode::GBP,
                        region: "GB".to_string(),
                        daily_price: price,
                        weekly_price: price * 6.0,
                    },
                )
                .await
                .unwrap();
        }

        let pricing = store
            .get_lot_pricing(lot.id, CurrencyCode::GBP, "GB")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(pricing.daily_price, 12.49);
    }

    #[tokio::test]
    async fn test_set_pricing_for_unknown_lot_fails() {
        let store = setup_store().await;

        let result = store
            .set_lot_pricing(
                LotId::new(),
                SetLotPricingRequest {
                    currency: CurrencyCode::USD,
                    region: "US".to_string(),
                    daily_price: 9.99,
                    weekly_price: 49.99,
                },
            )
            .await;

        assert!(matches!(result, Err(StoreError::NotFound)));
    }
}
