//! PricingService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use currency_locale::{CurrencyCode, Region};
    use pricing_types::{
        AppError, CreateLotRequest, ExchangeRate, FetchError, LotId, LotPricing, ParkingLot,
        RateFetcher, RateStore, SetLotPricingRequest, StoreError,
    };

    use crate::{PricingService, RequestLocale};

    /// Simple in-memory store for testing the service layer.
    pub struct MockStore {
        rates: Mutex<Vec<ExchangeRate>>,
        lots: Mutex<HashMap<LotId, ParkingLot>>,
        pricing: Mutex<HashMap<(LotId, CurrencyCode, String), LotPricing>>,
        fail_save: bool,
        save_calls: AtomicUsize,
    }

    impl MockStore {
        pub fn new() -> Self {
            Self {
                rates: Mutex::new(Vec::new()),
                lots: Mutex::new(HashMap::new()),
                pricing: Mutex::new(HashMap::new()),
                fail_save: false,
                save_calls: AtomicUsize::new(0),
            }
        }

        pub fn failing_saves() -> Self {
            Self {
                fail_save: true,
                ..Self::new()
            }
        }

        /// Seeds an active cached rate that is `age` old.
        pub fn seed_rate(&self, base: CurrencyCode, target: CurrencyCode, rate: f64, age: Duration) {
            let mut row = ExchangeRate::new(base, target, rate, "seeded".to_string()).unwrap();
            row.last_updated = Utc::now() - age;
            self.rates.lock().unwrap().push(row);
        }

        pub fn save_count(&self) -> usize {
            self.save_calls.load(Ordering::SeqCst)
        }

        pub fn active_rows(&self, base: CurrencyCode, target: CurrencyCode) -> Vec<ExchangeRate> {
            self.rates
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.base_currency == base && r.target_currency == target && r.is_active)
                .cloned()
                .collect()
        }

        pub fn total_rows(&self) -> usize {
            self.rates.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RateStore for MockStore {
        async fn get_active_rate(
            &self,
            base: CurrencyCode,
            target: CurrencyCode,
        ) -> Result<Option<ExchangeRate>, StoreError> {
            Ok(self
                .rates
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.base_currency == base && r.target_currency == target && r.is_active)
                .cloned())
        }

        async fn save_rate(
            &self,
            base: CurrencyCode,
            target: CurrencyCode,
            rate: f64,
            provider: &str,
        ) -> Result<ExchangeRate, StoreError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_save {
                return Err(StoreError::Database("saves disabled".into()));
            }

            let mut rates = self.rates.lock().unwrap();
            for row in rates.iter_mut() {
                if row.base_currency == base && row.target_currency == target {
                    row.is_active = false;
                }
            }
            let row = ExchangeRate::new(base, target, rate, provider.to_string())
                .map_err(StoreError::Domain)?;
            rates.push(row.clone());
            Ok(row)
        }

        async fn list_active_rates(
            &self,
            base: CurrencyCode,
        ) -> Result<Vec<ExchangeRate>, StoreError> {
            Ok(self
                .rates
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.base_currency == base && r.is_active)
                .cloned()
                .collect())
        }

        async fn rate_history(
            &self,
            base: CurrencyCode,
            target: CurrencyCode,
        ) -> Result<Vec<ExchangeRate>, StoreError> {
            Ok(self
                .rates
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.base_currency == base && r.target_currency == target)
                .cloned()
                .collect())
        }

        async fn create_lot(&self, req: CreateLotRequest) -> Result<ParkingLot, StoreError> {
            let lot = ParkingLot::new(req.name, req.airport_code, req.distance_miles)
                .map_err(StoreError::Domain)?;
            self.lots.lock().unwrap().insert(lot.id, lot.clone());
            Ok(lot)
        }

        async fn get_lot(&self, id: LotId) -> Result<Option<ParkingLot>, StoreError> {
            Ok(self.lots.lock().unwrap().get(&id).cloned())
        }

        async fn search_lots(&self, airport_code: &str) -> Result<Vec<ParkingLot>, StoreError> {
            Ok(self
                .lots
                .lock()
                .unwrap()
                .values()
                .filter(|l| l.airport_code == airport_code)
                .cloned()
                .collect())
        }

        async fn set_lot_pricing(
            &self,
            lot_id: LotId,
            req: SetLotPricingRequest,
        ) -> Result<LotPricing, StoreError> {
            if !self.lots.lock().unwrap().contains_key(&lot_id) {
                return Err(StoreError::NotFound);
            }
            let row = LotPricing {
                lot_id,
                currency: req.currency,
                region: req.region.clone(),
                daily_price: req.daily_price,
                weekly_price: req.weekly_price,
            };
            self.pricing
                .lock()
                .unwrap()
                .insert((lot_id, req.currency, req.region), row.clone());
            Ok(row)
        }

        async fn get_lot_pricing(
            &self,
            lot_id: LotId,
            currency: CurrencyCode,
            region: &str,
        ) -> Result<Option<LotPricing>, StoreError> {
            Ok(self
                .pricing
                .lock()
                .unwrap()
                .get(&(lot_id, currency, region.to_string()))
                .cloned())
        }
    }

    /// Provider stub. `None` behaves like a provider outage.
    #[derive(Clone)]
    pub struct MockFetcher {
        rate: Option<f64>,
        calls: Arc<AtomicUsize>,
    }

    impl MockFetcher {
        pub fn returning(rate: f64) -> Self {
            Self {
                rate: Some(rate),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn failing() -> Self {
            Self {
                rate: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn call_counter(&self) -> Arc<AtomicUsize> {
            self.calls.clone()
        }
    }

    #[async_trait]
    impl RateFetcher for MockFetcher {
        async fn fetch_rate(
            &self,
            from: CurrencyCode,
            to: CurrencyCode,
        ) -> Result<f64, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.rate {
                Some(rate) => Ok(rate),
                None => Err(FetchError::RateNotAvailable(from, to)),
            }
        }

        fn provider_name(&self) -> &str {
            "mock-rates"
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rate resolution
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_identity_pair_skips_all_ports() {
        let fetcher = MockFetcher::returning(0.8);
        let fetches = fetcher.call_counter();
        let service = PricingService::new(MockStore::new(), fetcher);

        let rate = service
            .exchange_rate(CurrencyCode::USD, CurrencyCode::USD)
            .await;

        assert_eq!(rate, 1.0);
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
        assert_eq!(service.store().save_count(), 0);
    }

    #[tokio::test]
    async fn test_fresh_cached_rate_skips_fetch() {
        let store = MockStore::new();
        store.seed_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.8, Duration::hours(1));

        let fetcher = MockFetcher::returning(0.99);
        let fetches = fetcher.call_counter();
        let service = PricingService::new(store, fetcher);

        let rate = service
            .exchange_rate(CurrencyCode::USD, CurrencyCode::GBP)
            .await;

        assert_eq!(rate, 0.8);
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stale_cached_rate_triggers_refresh() {
        let store = MockStore::new();
        store.seed_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.8, Duration::hours(7));

        let fetcher = MockFetcher::returning(0.82);
        let fetches = fetcher.call_counter();
        let service = PricingService::new(store, fetcher);

        let rate = service
            .exchange_rate(CurrencyCode::USD, CurrencyCode::GBP)
            .await;

        assert_eq!(rate, 0.82);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        // Supersede: one active row, stale history retained
        let active = service
            .store()
            .active_rows(CurrencyCode::USD, CurrencyCode::GBP);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].rate, 0.82);
        assert_eq!(service.store().total_rows(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_stale_rate() {
        let store = MockStore::new();
        store.seed_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.8, Duration::hours(7));

        let service = PricingService::new(store, MockFetcher::failing());

        let rate = service
            .exchange_rate(CurrencyCode::USD, CurrencyCode::GBP)
            .await;

        assert_eq!(rate, 0.8);
    }

    #[tokio::test]
    async fn test_fetch_failure_with_empty_cache_degrades_to_parity() {
        let service = PricingService::new(MockStore::new(), MockFetcher::failing());

        let rate = service
            .exchange_rate(CurrencyCode::USD, CurrencyCode::GBP)
            .await;

        assert_eq!(rate, 1.0);
    }

    #[tokio::test]
    async fn test_persist_failure_still_returns_fetched_rate() {
        let service = PricingService::new(MockStore::failing_saves(), MockFetcher::returning(0.82));

        let rate = service
            .exchange_rate(CurrencyCode::USD, CurrencyCode::GBP)
            .await;

        assert_eq!(rate, 0.82);
        assert_eq!(service.store().save_count(), 1);
    }

    #[tokio::test]
    async fn test_initialize_rates_covers_every_ordered_pair() {
        let fetcher = MockFetcher::returning(0.9);
        let fetches = fetcher.call_counter();
        let service = PricingService::new(MockStore::new(), fetcher);

        service.initialize_rates().await;

        // 3 currencies, ordered pairs, identity skipped
        assert_eq!(fetches.load(Ordering::SeqCst), 6);
        assert_eq!(service.store().save_count(), 6);
    }

    #[tokio::test]
    async fn test_initialize_rates_survives_provider_outage() {
        let fetcher = MockFetcher::failing();
        let fetches = fetcher.call_counter();
        let service = PricingService::new(MockStore::new(), fetcher);

        service.initialize_rates().await;

        assert_eq!(fetches.load(Ordering::SeqCst), 6);
        assert_eq!(service.store().save_count(), 0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion and localization
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_rounds_half_up_to_two_decimals() {
        let store = MockStore::new();
        store.seed_rate(
            CurrencyCode::USD,
            CurrencyCode::GBP,
            0.791234,
            Duration::hours(1),
        );
        let service = PricingService::new(store, MockFetcher::failing());

        let converted = service
            .convert(10.0, CurrencyCode::USD, CurrencyCode::GBP)
            .await;

        assert_eq!(converted, 7.91);
    }

    #[tokio::test]
    async fn test_localized_pricing_gb_includes_vat() {
        let store = MockStore::new();
        store.seed_rate(CurrencyCode::USD, CurrencyCode::GBP, 0.8, Duration::hours(1));
        let service = PricingService::new(store, MockFetcher::failing());

        let price = service
            .localized_pricing(100.0, CurrencyCode::USD, CurrencyCode::GBP, Region::GB)
            .await;

        // 100 * 0.8 = 80.00, + 20% VAT baked in = 96.00
        assert_eq!(price.price, 96.0);
        assert_eq!(price.formatted, "£96.00");
        assert!(price.includes_tax);
        assert_eq!(price.tax_rate, 0.20);
    }

    #[tokio::test]
    async fn test_localized_pricing_us_keeps_tax_separate() {
        let service = PricingService::new(MockStore::new(), MockFetcher::failing());

        let price = service
            .localized_pricing(100.0, CurrencyCode::USD, CurrencyCode::USD, Region::US)
            .await;

        assert_eq!(price.price, 100.0);
        assert_eq!(price.formatted, "$100.00");
        assert!(!price.includes_tax);
        assert_eq!(price.tax_rate, 0.0875);
    }

    #[tokio::test]
    async fn test_localized_pricing_other_region_has_no_tax() {
        let service = PricingService::new(MockStore::new(), MockFetcher::failing());

        let price = service
            .localized_pricing(100.0, CurrencyCode::EUR, CurrencyCode::EUR, Region::Other)
            .await;

        assert_eq!(price.price, 100.0);
        assert!(price.includes_tax);
        assert_eq!(price.tax_rate, 0.0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request locale
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_request_locale_defaults_to_us() {
        let locale = RequestLocale::from_params(None, None, None);

        assert_eq!(locale.region, Region::US);
        assert_eq!(locale.currency, CurrencyCode::USD);
        assert_eq!(locale.locale, "en-US");
    }

    #[test]
    fn test_request_locale_gb_defaults() {
        let locale = RequestLocale::from_params(Some("gb".to_string()), None, None);

        assert_eq!(locale.region, Region::GB);
        assert_eq!(locale.region_code, "GB");
        assert_eq!(locale.currency, CurrencyCode::GBP);
        assert_eq!(locale.locale, "en-GB");
    }

    #[test]
    fn test_request_locale_bad_currency_falls_back_to_region_default() {
        let locale = RequestLocale::from_params(
            Some("GB".to_string()),
            Some("XYZ".to_string()),
            Some("cy-GB".to_string()),
        );

        assert_eq!(locale.currency, CurrencyCode::GBP);
        assert_eq!(locale.locale, "cy-GB");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Parking search
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_set_lot_pricing_for_unknown_lot_is_not_found() {
        let service = PricingService::new(MockStore::new(), MockFetcher::failing());

        let result = service
            .set_lot_pricing(
                LotId::new(),
                SetLotPricingRequest {
                    currency: CurrencyCode::GBP,
                    region: "GB".to_string(),
                    daily_price: 14.99,
                    weekly_price: 79.99,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_localizes_distance_and_attaches_pricing() {
        let service = PricingService::new(MockStore::new(), MockFetcher::failing());

        let lot = service
            .create_lot(CreateLotRequest {
                name: "Long Stay A".to_string(),
                airport_code: "LHR".to_string(),
                distance_miles: 10.0,
            })
            .await
            .unwrap();

        service
            .set_lot_pricing(
                lot.id,
                SetLotPricingRequest {
                    currency: CurrencyCode::GBP,
                    region: "GB".to_string(),
                    daily_price: 14.99,
                    weekly_price: 79.99,
                },
            )
            .await
            .unwrap();

        let locale = RequestLocale::from_params(Some("GB".to_string()), None, None);
        let results = service.search_lots("LHR", &locale).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].distance_formatted, "16.1 km");
        assert_eq!(results[0].currency, CurrencyCode::GBP);
        let pricing = results[0].pricing.as_ref().unwrap();
        assert_eq!(pricing.daily_price, 14.99);
        assert_eq!(pricing.weekly_price, 79.99);
    }

    #[tokio::test]
    async fn test_search_without_pricing_row_returns_null_pricing() {
        let service = PricingService::new(MockStore::new(), MockFetcher::failing());

        service
            .create_lot(CreateLotRequest {
                name: "Economy".to_string(),
                airport_code: "JFK".to_string(),
                distance_miles: 3.2,
            })
            .await
            .unwrap();

        let locale = RequestLocale::from_params(None, None, None);
        let results = service.search_lots("JFK", &locale).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].distance_formatted, "3.2 miles");
        assert!(results[0].pricing.is_none());
    }
}
