//! In-memory state and configuration of the mock service.

use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};

use crate::model::{Donation, FundraisingPage, Image, Media, PageUpdate, Team, Video};

pub const DEFAULT_USERNAME: &str = "apitests@example.org";
pub const DEFAULT_PASSWORD: &str = "password";
pub const OWNER_USERNAME: &str = "owner@example.org";
pub const OWNER_PASSWORD: &str = "owner-password";
pub const DEFAULT_DOMAIN: &str = "www.fundraising.example.org";
pub const RFL_DOMAIN: &str = "rfl.fundraising.example.org";

/// Public page seeded at startup, owned by `OWNER_USERNAME`.
pub const SEEDED_PAGE: &str = "community-fun-run";
pub const SEEDED_UPDATE_ID: i64 = 100142;
pub const SEEDED_DONATION_REF: &str = "fun-run-2026";
pub const SEEDED_TEAM: &str = "hospice-harriers";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockUser {
    pub username: String,
    pub password: String,
    pub display_name: String,
}

impl MockUser {
    pub fn new(username: &str, password: &str, display_name: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub users: Vec<MockUser>,
    /// Known white-label domains; the first one is the default.
    pub domains: Vec<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            users: vec![
                MockUser::new(DEFAULT_USERNAME, DEFAULT_PASSWORD, "Api Tests"),
                MockUser::new(OWNER_USERNAME, OWNER_PASSWORD, "Page Owner"),
            ],
            domains: vec![DEFAULT_DOMAIN.to_string(), RFL_DOMAIN.to_string()],
        }
    }
}

impl MockConfig {
    /// Defaults overridden by `MOCK_USERNAME`, `MOCK_PASSWORD` and
    /// `MOCK_DOMAINS` (comma separated).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        let credentials = (std::env::var("MOCK_USERNAME"), std::env::var("MOCK_PASSWORD"));
        if let (Ok(username), Ok(password)) = credentials {
            config.users[0] = MockUser::new(&username, &password, "Api Tests");
        }
        if let Ok(domains) = std::env::var("MOCK_DOMAINS") {
            let parsed: Vec<String> = domains
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
            if !parsed.is_empty() {
                config.domains = parsed;
            }
        }
        config
    }

    pub fn user(&self, username: &str, password: &str) -> Option<&MockUser> {
        self.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username) && u.password == password)
    }

    pub fn knows_domain(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d.eq_ignore_ascii_case(domain))
    }

    pub fn default_domain(&self) -> &str {
        self.domains.first().map(String::as_str).unwrap_or(DEFAULT_DOMAIN)
    }
}

#[derive(Clone, Debug)]
pub struct StoredPage {
    pub page: FundraisingPage,
    pub owner: String,
    pub domain: String,
    pub updates: Vec<PageUpdate>,
    pub donations: Vec<Donation>,
}

#[derive(Debug)]
pub struct Store {
    pub pages: HashMap<String, StoredPage>,
    next_page_id: i64,
    next_update_id: i64,
    next_person_id: i64,
}

impl Store {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            next_page_id: 1,
            next_update_id: 1,
            next_person_id: 1,
        }
    }

    /// Store holding the public seeded page.
    pub fn seeded(domain: &str) -> Self {
        let mut store = Self::new();
        store.next_update_id = SEEDED_UPDATE_ID + 1;
        let page_id = store.next_page_id();
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().unwrap_or_else(Utc::now);

        let page = FundraisingPage {
            page_id,
            page_short_name: SEEDED_PAGE.to_string(),
            page_title: "Community fun run".to_string(),
            activity_type: Some("Running".to_string()),
            event_name: Some("Spring fun run".to_string()),
            event_date: Some(created + Duration::days(30)),
            event_id: None,
            charity_id: Some(2050),
            company_appeal_id: None,
            target_amount: Some(500.0),
            story: "Running five miles for the local hospice.".to_string(),
            page_summary_what: None,
            page_summary_why: None,
            total_raised_online: 35.0,
            grand_total_raised_excluding_gift_aid: 35.0,
            total_raised_sms: "0.00".to_string(),
            currency_code: "GBP".to_string(),
            sms_code: format!("FUND{page_id:02}"),
            page_creator_name: "Page Owner".to_string(),
            status: "Active".to_string(),
            theme: None,
            custom_codes: None,
            media: Media {
                images: vec![Image {
                    caption: "Start line".to_string(),
                    url: "http://images.example.org/community-fun-run/start.jpg".to_string(),
                    absolute_url: None,
                    is_default: true,
                }],
                videos: vec![Video {
                    caption: "Training".to_string(),
                    url: "http://www.youtube.com/watch?v=MSxjbF18BBM".to_string(),
                }],
            },
            teams: vec![Team {
                id: 4012,
                name: "Hospice Harriers".to_string(),
                short_name: SEEDED_TEAM.to_string(),
            }],
            attribution: None,
            remembered_person_summary: None,
        };

        let donation = |id: i64, amount: f64, name: &str, reference: Option<&str>| Donation {
            id,
            amount,
            currency_code: "GBP".to_string(),
            donor_display_name: Some(name.to_string()),
            message: Some("Good luck!".to_string()),
            donation_date: created + Duration::days(id),
            donation_ref: reference.map(str::to_string),
        };

        store.pages.insert(
            SEEDED_PAGE.to_string(),
            StoredPage {
                page,
                owner: OWNER_USERNAME.to_string(),
                domain: domain.to_string(),
                updates: vec![PageUpdate {
                    id: SEEDED_UPDATE_ID,
                    message: "Training is going well".to_string(),
                    created_date: created,
                }],
                donations: vec![
                    donation(1, 20.0, "Alex", Some(SEEDED_DONATION_REF)),
                    donation(2, 15.0, "Sam", None),
                ],
            },
        );
        store
    }

    pub fn next_page_id(&mut self) -> i64 {
        let id = self.next_page_id;
        self.next_page_id += 1;
        id
    }

    pub fn next_update_id(&mut self) -> i64 {
        let id = self.next_update_id;
        self.next_update_id += 1;
        id
    }

    pub fn next_person_id(&mut self) -> i64 {
        let id = self.next_person_id;
        self.next_person_id += 1;
        id
    }

    /// Short names built from `preferred` that are still free.
    pub fn suggest(&self, preferred: &str, count: usize) -> Vec<String> {
        let base: String = preferred
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        let base = base.trim_matches('-').to_string();
        if base.is_empty() {
            return Vec::new();
        }
        std::iter::once(base.clone())
            .chain((1..).map(|n| format!("{base}-{n}")))
            .filter(|name| !self.pages.contains_key(name))
            .take(count)
            .collect()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
