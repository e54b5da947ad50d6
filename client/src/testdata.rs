//! Generated and predefined test data for suite scenarios.
//!
//! # Design
//! `TestDataGenerator` draws from a seedable RNG so a failing run can be
//! reproduced with the same data. Emails are the one exception: they get a
//! random unique tag regardless of seed, because registration is stateful
//! on the server and replaying an email produces a duplicate-account
//! conflict instead of the original scenario. `fixtures` holds the fixed
//! descriptors and boundary values used by targeted tests.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::types::{EventDraft, UserProfile};

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Carmen", "Derek", "Elena", "Felix", "Greta", "Hassan", "Ines", "Jonas",
    "Katya", "Liam", "Mara", "Noah", "Olga", "Pavel",
];

const LAST_NAMES: &[&str] = &[
    "Alvarez", "Becker", "Castillo", "Dvorak", "Eriksen", "Fontaine", "Garcia", "Hoffman",
    "Ivanova", "Jansen", "Koval", "Lindqvist", "Moreau", "Novak", "Okafor", "Petrov",
];

const CITIES: &[&str] = &[
    "Lisbon", "Prague", "Oslo", "Valencia", "Krakow", "Porto", "Vienna", "Riga", "Dublin",
    "Zagreb",
];

const TITLE_PREFIXES: &[&str] = &["Family", "Business", "Weekend", "Summer", "Annual", "Group"];

const EVENT_TOPICS: &[&str] = &[
    "Flight Check-in",
    "Hotel Review",
    "Itinerary Sync",
    "Visa Appointment",
    "Booking Follow-up",
    "Trip Planning",
    "Airport Transfer",
    "Travel Insurance Call",
];

const DESCRIPTIONS: &[&str] = &[
    "Confirm the reservation details before the trip.",
    "Allow extra time for security and passport control.",
    "Bring printed copies of the booking confirmation.",
    "Check the cancellation policy the day before.",
    "Verify the pickup point with the local operator.",
];

const PASSWORD_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";

const REMINDER_CHOICES: &[u32] = &[15, 30, 60, 120];

/// Randomized producer of user profiles and event drafts.
pub struct TestDataGenerator {
    rng: StdRng,
}

impl TestDataGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generator whose output (apart from email tags) is reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A registerable profile with a unique email and a fresh password.
    pub fn user(&mut self) -> UserProfile {
        let password = self.password();
        self.user_with_credentials(&unique_email(), &password)
    }

    /// A profile with fixed credentials and generated personal details.
    pub fn user_with_credentials(&mut self, email: &str, password: &str) -> UserProfile {
        UserProfile {
            email: email.to_string(),
            password: password.to_string(),
            first_name: self.pick(FIRST_NAMES).to_string(),
            last_name: self.pick(LAST_NAMES).to_string(),
            phone: Some(format!(
                "+1-555-{:03}-{:04}",
                self.rng.gen_range(100..1000),
                self.rng.gen_range(0..10000)
            )),
        }
    }

    /// A 12-character password mixing letters, digits, and specials.
    pub fn password(&mut self) -> String {
        (0..12)
            .map(|_| PASSWORD_CHARS[self.rng.gen_range(0..PASSWORD_CHARS.len())] as char)
            .collect()
    }

    /// An event draft one to thirty days out.
    pub fn event(&mut self) -> EventDraft {
        let days = self.rng.gen_range(1..=30);
        self.event_on_day(days)
    }

    /// An event draft with a fixed title, one to thirty days out.
    pub fn titled_event(&mut self, title: &str) -> EventDraft {
        let mut draft = self.event();
        draft.title = title.to_string();
        draft
    }

    /// A two-hour event starting on the given day, between 09:00 and 17:00.
    pub fn event_on_day(&mut self, days_from_now: i64) -> EventDraft {
        let hour = self.rng.gen_range(9..=17);
        let start = at_hour(days_from_now, hour);
        let is_recurring = self.rng.gen_bool(0.3);
        EventDraft {
            title: format!(
                "{} {}",
                self.pick(TITLE_PREFIXES),
                self.pick(EVENT_TOPICS)
            ),
            description: self.pick(DESCRIPTIONS).to_string(),
            start_date: start,
            end_date: start + Duration::hours(2),
            location: self.pick(CITIES).to_string(),
            reminder_minutes: REMINDER_CHOICES[self.rng.gen_range(0..REMINDER_CHOICES.len())],
            is_recurring,
            recurrence_pattern: is_recurring.then(|| "WEEKLY".to_string()),
        }
    }

    /// `count` drafts on consecutive future days, one per day.
    pub fn events(&mut self, count: usize) -> Vec<EventDraft> {
        (0..count)
            .map(|i| self.event_on_day(i as i64 + 1))
            .collect()
    }

    fn pick<'a>(&mut self, table: &'a [&'a str]) -> &'a str {
        table[self.rng.gen_range(0..table.len())]
    }
}

impl Default for TestDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn unique_email() -> String {
    let tag = Uuid::new_v4().simple().to_string();
    format!("test_{}@example.com", &tag[..8])
}

fn at_hour(days_from_now: i64, hour: u32) -> DateTime<Utc> {
    let date = (Utc::now() + Duration::days(days_from_now)).date_naive();
    date.and_hms_opt(hour, 0, 0)
        .expect("wall-clock hour is in range")
        .and_utc()
}

/// Fixed descriptors and boundary values.
pub mod fixtures {
    use super::{at_hour, Duration, Utc};
    use crate::config::Settings;
    use crate::types::{EventDraft, UserProfile};

    pub const SPECIAL_CHARS_TITLE: &str = "Событие !@#$%^&*()_+";
    pub const SPECIAL_CHARS_DESCRIPTION: &str = r"Description with <>[]{}|\/~` chars";

    /// The standing test account from the suite settings.
    pub fn valid_user(settings: &Settings) -> UserProfile {
        UserProfile {
            email: settings.test_email.clone(),
            password: settings.test_password.clone(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
        }
    }

    /// Credentials no deployment should accept.
    pub fn invalid_user() -> UserProfile {
        UserProfile {
            email: "invalid@example.com".to_string(),
            password: "WrongPassword123".to_string(),
            first_name: "Invalid".to_string(),
            last_name: "User".to_string(),
            phone: None,
        }
    }

    /// A plain one-hour meeting tomorrow morning.
    pub fn simple_event() -> EventDraft {
        let start = at_hour(1, 10);
        EventDraft {
            title: "Team Meeting".to_string(),
            description: "Weekly team sync".to_string(),
            start_date: start,
            end_date: start + Duration::hours(1),
            location: "Conference Room A".to_string(),
            reminder_minutes: 15,
            is_recurring: false,
            recurrence_pattern: None,
        }
    }

    /// A short recurring event with a daily pattern.
    pub fn recurring_event() -> EventDraft {
        let start = at_hour(1, 9);
        EventDraft {
            title: "Daily Standup".to_string(),
            description: "Daily team standup".to_string(),
            start_date: start,
            end_date: start + Duration::minutes(30),
            location: "Zoom".to_string(),
            reminder_minutes: 10,
            is_recurring: true,
            recurrence_pattern: Some("DAILY".to_string()),
        }
    }

    /// A near-term maintenance window with a long reminder.
    pub fn urgent_event() -> EventDraft {
        let start = Utc::now() + Duration::hours(2);
        EventDraft {
            title: "Urgent: Server Maintenance".to_string(),
            description: "Critical server maintenance window".to_string(),
            start_date: start,
            end_date: start + Duration::hours(4),
            location: "Data Center".to_string(),
            reminder_minutes: 60,
            is_recurring: false,
            recurrence_pattern: None,
        }
    }

    /// Title at the documented 100-character limit.
    pub fn long_title() -> String {
        "A".repeat(100)
    }

    /// Description at the documented 500-character limit.
    pub fn long_description() -> String {
        "B".repeat(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn seeded_generators_agree_on_everything_but_email() {
        let mut a = TestDataGenerator::seeded(42);
        let mut b = TestDataGenerator::seeded(42);
        let ua = a.user();
        let ub = b.user();
        assert_eq!(ua.first_name, ub.first_name);
        assert_eq!(ua.last_name, ub.last_name);
        assert_eq!(ua.phone, ub.phone);
        assert_eq!(ua.password, ub.password);
        assert_ne!(ua.email, ub.email);
    }

    #[test]
    fn generated_emails_are_unique() {
        let mut gen = TestDataGenerator::seeded(1);
        assert_ne!(gen.user().email, gen.user().email);
    }

    #[test]
    fn passwords_are_twelve_chars_from_the_charset() {
        let mut gen = TestDataGenerator::seeded(7);
        for _ in 0..20 {
            let password = gen.password();
            assert_eq!(password.len(), 12);
            assert!(password
                .bytes()
                .all(|b| PASSWORD_CHARS.contains(&b)));
        }
    }

    #[test]
    fn events_last_two_hours() {
        let mut gen = TestDataGenerator::seeded(3);
        let draft = gen.event();
        assert_eq!(draft.end_date - draft.start_date, Duration::hours(2));
    }

    #[test]
    fn event_on_day_lands_on_the_requested_day() {
        let mut gen = TestDataGenerator::seeded(3);
        let draft = gen.event_on_day(5);
        let expected = (Utc::now() + Duration::days(5)).date_naive();
        assert_eq!(draft.start_date.date_naive(), expected);
    }

    #[test]
    fn batch_events_land_on_distinct_days() {
        let mut gen = TestDataGenerator::seeded(11);
        let drafts = gen.events(3);
        assert_eq!(drafts.len(), 3);
        let days: Vec<_> = drafts.iter().map(|d| d.start_date.date_naive()).collect();
        assert_ne!(days[0], days[1]);
        assert_ne!(days[1], days[2]);
    }

    #[test]
    fn recurrence_pattern_tracks_the_recurring_flag() {
        let mut gen = TestDataGenerator::seeded(5);
        for _ in 0..50 {
            let draft = gen.event();
            assert_eq!(draft.is_recurring, draft.recurrence_pattern.is_some());
            if let Some(pattern) = &draft.recurrence_pattern {
                assert_eq!(pattern, "WEEKLY");
            }
        }
    }

    #[test]
    fn titled_event_keeps_the_title() {
        let mut gen = TestDataGenerator::seeded(9);
        let draft = gen.titled_event("Visa Appointment Reminder");
        assert_eq!(draft.title, "Visa Appointment Reminder");
    }

    #[test]
    fn valid_user_comes_from_settings() {
        let user = fixtures::valid_user(&Settings::default());
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.password, "Test123!");
    }

    #[test]
    fn simple_event_shape() {
        let draft = fixtures::simple_event();
        assert_eq!(draft.title, "Team Meeting");
        assert_eq!(draft.end_date - draft.start_date, Duration::hours(1));
        assert_eq!(draft.reminder_minutes, 15);
        assert!(!draft.is_recurring);
    }

    #[test]
    fn recurring_event_carries_daily_pattern() {
        let draft = fixtures::recurring_event();
        assert!(draft.is_recurring);
        assert_eq!(draft.recurrence_pattern.as_deref(), Some("DAILY"));
    }

    #[test]
    fn boundary_values_have_documented_sizes() {
        assert_eq!(fixtures::long_title().len(), 100);
        assert_eq!(fixtures::long_description().len(), 500);
        assert!(fixtures::SPECIAL_CHARS_TITLE.contains("!@#$"));
        assert!(fixtures::SPECIAL_CHARS_DESCRIPTION.contains('\\'));
    }
}
