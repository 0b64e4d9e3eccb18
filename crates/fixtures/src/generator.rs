use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use common::DocumentId;

use crate::random::rand_in_range;
use crate::{Customer, TIMESTAMP_FORMAT, Visit, WordLists};

/// Produces random but shape-valid customer and visit records.
///
/// Every quantity is drawn with [`rand_in_range`], so all numeric
/// ranges are half-open. The RNG is seedable to keep generation
/// deterministic in tests.
pub struct FixtureGenerator {
    words: WordLists,
    rng: StdRng,
}

impl FixtureGenerator {
    /// Creates a generator with an entropy-seeded RNG.
    pub fn new(words: WordLists) -> Self {
        Self {
            words,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a generator with a fixed seed for deterministic output.
    pub fn with_seed(words: WordLists, seed: u64) -> Self {
        Self {
            words,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates one random customer.
    ///
    /// Name parts, occupation, race, and birthplace are independent
    /// uniform choices; the email is not random — it is derived from
    /// the chosen forename and surname, so it matches the name fields
    /// even when different records pick the same name.
    pub fn generate_person(&mut self) -> Customer {
        let Self { words, rng } = self;

        let forename = choose(rng, &words.forenames);
        let surname = choose(rng, &words.surnames);
        let occupation = choose(rng, &words.occupations);
        let race = choose(rng, &words.races);
        let birthplace = choose(rng, &words.places);

        Customer {
            kind: Customer::KIND.to_string(),
            name: format!("{forename} {surname}"),
            age: rand_in_range(rng, 4, 80),
            occupation: occupation.to_string(),
            height: rand_in_range(rng, 100, 230),
            weight: rand_in_range(rng, 40, 140),
            family: surname.to_string(),
            birthplace: birthplace.to_string(),
            email: format!(
                "{}.{}@gmail.com",
                forename.to_lowercase(),
                surname.to_lowercase()
            ),
            race: race.to_string(),
        }
    }

    /// Generates one random visit for the given customer.
    ///
    /// The timestamp is a uniform instant in the fixed historical
    /// window, with the day drawn from `[1, 28)` so month length never
    /// matters; each IP octet is an independent draw from `[1, 255)`.
    pub fn generate_visit(&mut self, customer: &DocumentId) -> Visit {
        let rng = &mut self.rng;

        let year = rand_in_range(rng, 2000, 2018) as i32;
        let month = rand_in_range(rng, 1, 12) as u32;
        let day = rand_in_range(rng, 1, 28) as u32;
        let hour = rand_in_range(rng, 0, 23) as u32;
        let minute = rand_in_range(rng, 0, 59) as u32;
        let second = rand_in_range(rng, 0, 59) as u32;

        let timestamp = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .expect("drawn date components are always in range");

        let octets: Vec<String> = (0..4)
            .map(|_| rand_in_range(rng, 1, 255).to_string())
            .collect();

        Visit {
            kind: Visit::KIND.to_string(),
            customer: customer.clone(),
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ip_address: octets.join("."),
        }
    }
}

/// Uniform choice from a word list; lists are validated non-empty at
/// load.
fn choose<'a, R: Rng>(rng: &mut R, list: &'a [String]) -> &'a str {
    &list[rng.gen_range(0..list.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDateTime};

    fn test_words() -> WordLists {
        WordLists {
            forenames: vec!["Mary".to_string(), "John".to_string()],
            surnames: vec!["Smith".to_string(), "Williams".to_string()],
            occupations: vec!["Baker".to_string(), "Vet".to_string()],
            races: vec!["Mixed".to_string()],
            places: vec!["London".to_string(), "Paris".to_string()],
        }
    }

    #[test]
    fn person_fields_stay_in_range() {
        let mut generator = FixtureGenerator::with_seed(test_words(), 11);
        for _ in 0..1_000 {
            let person = generator.generate_person();
            assert_eq!(person.kind, "customer");
            assert!((4..80).contains(&person.age));
            assert!((100..230).contains(&person.height));
            assert!((40..140).contains(&person.weight));
        }
    }

    #[test]
    fn email_is_derived_from_the_chosen_name() {
        let mut generator = FixtureGenerator::with_seed(test_words(), 23);
        for _ in 0..500 {
            let person = generator.generate_person();
            let forename = person
                .name
                .strip_suffix(&format!(" {}", person.family))
                .expect("name ends with the family surname");
            assert_eq!(
                person.email,
                format!(
                    "{}.{}@gmail.com",
                    forename.to_lowercase(),
                    person.family.to_lowercase()
                )
            );
        }
    }

    #[test]
    fn name_embeds_a_forename_and_the_family_surname() {
        let mut generator = FixtureGenerator::with_seed(test_words(), 5);
        let person = generator.generate_person();
        let words = test_words();

        let parts: Vec<&str> = person.name.split(' ').collect();
        assert_eq!(parts.len(), 2);
        assert!(words.forenames.iter().any(|f| f == parts[0]));
        assert_eq!(person.family, parts[1]);
        assert!(words.surnames.iter().any(|s| s == parts[1]));
    }

    #[test]
    fn visit_timestamp_stays_in_the_window() {
        let mut generator = FixtureGenerator::with_seed(test_words(), 99);
        let customer = DocumentId::new("c1");
        for _ in 0..1_000 {
            let visit = generator.generate_visit(&customer);
            let parsed = NaiveDateTime::parse_from_str(&visit.timestamp, TIMESTAMP_FORMAT)
                .expect("timestamp parses back with the same format");
            assert!((2000..2018).contains(&parsed.year()));
            assert!(parsed.day() <= 28, "day-of-month stays below 28");
        }
    }

    #[test]
    fn visit_ip_octets_stay_in_range() {
        let mut generator = FixtureGenerator::with_seed(test_words(), 3);
        let customer = DocumentId::new("c1");
        for _ in 0..1_000 {
            let visit = generator.generate_visit(&customer);
            let octets: Vec<i64> = visit
                .ip_address
                .split('.')
                .map(|octet| octet.parse().unwrap())
                .collect();
            assert_eq!(octets.len(), 4);
            for octet in octets {
                assert!((1..255).contains(&octet));
            }
        }
    }

    #[test]
    fn visit_references_the_given_customer() {
        let mut generator = FixtureGenerator::with_seed(test_words(), 8);
        let customer = DocumentId::new("the-customer");
        let visit = generator.generate_visit(&customer);
        assert_eq!(visit.kind, "visit");
        assert_eq!(visit.customer, customer);
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let mut a = FixtureGenerator::with_seed(test_words(), 1234);
        let mut b = FixtureGenerator::with_seed(test_words(), 1234);

        assert_eq!(a.generate_person(), b.generate_person());
        let id = DocumentId::new("c1");
        assert_eq!(a.generate_visit(&id), b.generate_visit(&id));
    }
}
