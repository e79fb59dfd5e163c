//! Synthetic client book generation.
//!
//! Stands in for a real data feed. The distributions live in
//! GeneratorConfig; nothing downstream depends on their exact shape.
//! All generation is deterministic (same seed + reference = same book).

use crate::{
    config::{GeneratorConfig, SegmentProfile},
    error::{BoardError, BoardResult},
    rng::{RngBank, StreamRng, StreamSlot},
    types::{Client, ClientStatus, Purchase, Region, Segment, Timestamp},
};
use chrono::Duration;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub struct ClientGenerator {
    config: GeneratorConfig,
}

impl ClientGenerator {
    pub fn new(config: GeneratorConfig) -> BoardResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generate the full book with every history ending at `reference`.
    pub fn generate(&self, reference: Timestamp) -> BoardResult<Vec<Client>> {
        let bank = RngBank::new(self.config.seed);
        let mut profile_rng = bank.for_stream(StreamSlot::Profile);
        let mut purchase_rng = bank.for_stream(StreamSlot::Purchases);
        let mut contact_rng = bank.for_stream(StreamSlot::Contact);

        let n = self.config.population;
        let mut clients = Vec::with_capacity(n);
        for i in 1..=n {
            let client = self.generate_client(
                i,
                reference,
                &mut profile_rng,
                &mut purchase_rng,
                &mut contact_rng,
            )?;
            clients.push(client);
        }

        let purchases: usize = clients.iter().map(|c| c.purchases.len()).sum();
        log::info!(
            "generator: seed={} produced {} clients with {} purchases",
            self.config.seed,
            clients.len(),
            purchases
        );
        Ok(clients)
    }

    fn generate_client(
        &self,
        i: usize,
        reference: Timestamp,
        profile_rng: &mut StreamRng,
        purchase_rng: &mut StreamRng,
        contact_rng: &mut StreamRng,
    ) -> BoardResult<Client> {
        let history_secs = self.config.history_days * SECONDS_PER_DAY;
        let age_secs = (profile_rng.next_f64() * history_secs as f64) as i64;
        let registration_date = reference
            .checked_sub_signed(Duration::seconds(history_secs - age_secs))
            .ok_or_else(|| {
                BoardError::InvalidConfig(format!(
                    "history of {} days reaches before the calendar start",
                    self.config.history_days
                ))
            })?;

        let segment = *profile_rng.pick(&Segment::ALL[..]);
        let status = *profile_rng.pick(&ClientStatus::ALL[..]);
        let region = *profile_rng.pick(&Region::ALL[..]);
        let profile = self.profile_for(segment)?;
        let purchase_frequency = profile_rng.uniform(profile.frequency_min, profile.frequency_max);

        let mut client = Client::new(format!("CLI{i:06}"), segment, region, status, registration_date);
        client.name = format!("Cliente {i}");
        client.email = format!("cliente{i}@exemplo.com");
        client.phone = format!(
            "({}) {}-{}",
            contact_rng.range_inclusive(10, 99),
            contact_rng.range_inclusive(10_000, 99_999),
            contact_rng.range_inclusive(1_000, 9_999),
        );
        client.city = format!("Cidade {}", contact_rng.range_inclusive(1, 100));
        client.purchase_frequency = purchase_frequency;
        client.satisfaction = profile_rng.range_inclusive(1, 5) as u8;
        client.churn_risk = profile_rng.next_f64();

        self.fill_purchase_history(&mut client, profile, reference, purchase_rng);
        if client.last_purchase_date.is_none() {
            client.last_purchase_date = Some(registration_date);
        }
        Ok(client)
    }

    /// Walk forward from registration in steps of roughly one purchase
    /// interval (±5 days) until the reference instant.
    fn fill_purchase_history(
        &self,
        client: &mut Client,
        profile: &SegmentProfile,
        reference: Timestamp,
        rng: &mut StreamRng,
    ) {
        let base_step = (30.0 / client.purchase_frequency).floor() as i64;
        let mut date = client.registration_date;
        loop {
            let step = (base_step + rng.range_inclusive(0, 9) - 5).max(1);
            date = match date.checked_add_signed(Duration::days(step)) {
                Some(next) if next <= reference => next,
                _ => break,
            };
            let product = rng.pick(&self.config.products).clone();
            let quantity = rng.range_inclusive(1, self.config.max_quantity as i64) as u32;
            let unit_price = rng.uniform(profile.price_min, profile.price_max);
            client.record_purchase(Purchase::new(date, product, quantity, unit_price));
        }
    }

    fn profile_for(&self, segment: Segment) -> BoardResult<&SegmentProfile> {
        self.config
            .profile(segment)
            .ok_or_else(|| BoardError::InvalidConfig(format!("no profile for segment {segment}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reference() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn generation_is_deterministic() {
        let gen_a = ClientGenerator::new(GeneratorConfig::default_test()).unwrap();
        let gen_b = ClientGenerator::new(GeneratorConfig::default_test()).unwrap();
        let a = gen_a.generate(reference()).unwrap();
        let b = gen_b.generate(reference()).unwrap();
        assert_eq!(a, b, "Same seed should produce the same book");
    }

    #[test]
    fn different_seeds_diverge() {
        let a = ClientGenerator::new(GeneratorConfig::default_test().with_seed(1))
            .unwrap()
            .generate(reference())
            .unwrap();
        let b = ClientGenerator::new(GeneratorConfig::default_test().with_seed(2))
            .unwrap()
            .generate(reference())
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn ids_and_contacts_follow_format() {
        let book = ClientGenerator::new(GeneratorConfig::default_test())
            .unwrap()
            .generate(reference())
            .unwrap();
        assert_eq!(book[0].id, "CLI000001");
        assert_eq!(book[49].id, "CLI000050");
        assert_eq!(book[0].email, "cliente1@exemplo.com");
        assert!(book[0].phone.starts_with('('), "phone: {}", book[0].phone);
        assert!(book[0].city.starts_with("Cidade "));
    }
}
