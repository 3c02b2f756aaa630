//! Page lifecycle tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port, then drives the real
//! `PageApi` over HTTP with the default ureq transport. Every scenario runs
//! once per wire format, so JSON and XML are held to the same behaviour.

use chrono::{TimeZone, Utc};
use fundraising_core::{
    ActivityType, AddFundraisingPageImageRequest, AddFundraisingPageVideoRequest, ApiError,
    ClientConfig, FundraisingPageAttribution, PageApi, PageCustomCodes, PageTheme,
    RegisterPageRequest, RememberedPerson, RememberedPersonReference, UpdateRequest, WireFormat,
};
use mock_server::store::{
    DEFAULT_PASSWORD, DEFAULT_USERNAME, RFL_DOMAIN, SEEDED_DONATION_REF, SEEDED_PAGE,
    SEEDED_TEAM, SEEDED_UPDATE_ID,
};

const FORMATS: [WireFormat; 2] = [WireFormat::Json, WireFormat::Xml];

/// Start the mock server on a random port and return its base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn config(base: &str, format: WireFormat) -> ClientConfig {
    ClientConfig::new(base, "app-key")
        .with_format(format)
        .with_credentials(DEFAULT_USERNAME, DEFAULT_PASSWORD)
}

fn api(base: &str, format: WireFormat) -> PageApi {
    PageApi::from_config(&config(base, format)).unwrap()
}

fn unique_name() -> String {
    format!("api-test-{}", uuid::Uuid::new_v4())
}

fn new_page(short_name: &str) -> RegisterPageRequest {
    RegisterPageRequest {
        page_short_name: short_name.to_string(),
        page_title: "Walk for life".to_string(),
        activity_type: Some(ActivityType::Walking),
        event_name: Some("Spring walk".to_string()),
        event_date: Utc.with_ymd_and_hms(2026, 11, 1, 10, 0, 0).single(),
        charity_id: Some(2050),
        target_amount: Some(250.0),
        ..Default::default()
    }
}

fn attribution(text: &str) -> FundraisingPageAttribution {
    FundraisingPageAttribution {
        attribution: text.to_string(),
    }
}

/// Register a fresh page and return its short name.
fn registered(pages: &PageApi) -> String {
    let short_name = unique_name();
    pages.create(&new_page(&short_name)).unwrap();
    short_name
}

// --- registration ---

#[test]
fn create_then_retrieve_reflects_request() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = unique_name();
        let request = new_page(&short_name);

        let created = pages.create(&request).unwrap();
        assert!(created.page_id > 0, "{format}");
        assert!(created.next.uri.ends_with(&short_name), "{format}");

        let page = pages.retrieve(&short_name).unwrap();
        assert_eq!(page.page_id, created.page_id, "{format}");
        assert_eq!(page.page_short_name, request.page_short_name, "{format}");
        assert_eq!(page.page_title, request.page_title, "{format}");
        assert_eq!(page.activity_type, request.activity_type, "{format}");
        assert_eq!(page.event_name, request.event_name, "{format}");
        assert_eq!(page.event_date, request.event_date, "{format}");
        assert_eq!(page.charity_id, request.charity_id, "{format}");
        assert_eq!(page.target_amount, request.target_amount, "{format}");
        assert_eq!(page.status, "Active", "{format}");
    }
}

#[test]
fn in_memory_page_carries_attribution_and_person() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = unique_name();
        let request = RegisterPageRequest {
            activity_type: Some(ActivityType::InMemory),
            attribution: Some("In memory of Albert".to_string()),
            remembered_person_reference: Some(RememberedPersonReference {
                relationship: Some("Grandfather".to_string()),
                remembered_person: RememberedPerson {
                    first_name: Some("Albert".to_string()),
                    last_name: Some("Smith".to_string()),
                    town: Some("Leeds".to_string()),
                    ..Default::default()
                },
            }),
            ..new_page(&short_name)
        };
        pages.create(&request).unwrap();

        let page = pages.retrieve(&short_name).unwrap();
        assert_eq!(page.attribution.as_deref(), Some("In memory of Albert"), "{format}");
        let summary = page.remembered_person_summary.unwrap();
        assert_eq!(summary.name, "Albert Smith", "{format}");
        assert!(summary.next.is_some(), "{format}");
    }
}

#[test]
fn optional_registration_fields_round_trip() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = unique_name();
        let request = RegisterPageRequest {
            company_appeal_id: Some(200),
            page_summary_what: Some("walking ten miles".to_string()),
            page_summary_why: Some("for the hospice".to_string()),
            theme: Some(PageTheme {
                background_colour: Some("#FFFFFF".to_string()),
                button_colour: Some("#FF0000".to_string()),
                button_text_colour: Some("#000000".to_string()),
                title_colour: Some("#00FF00".to_string()),
            }),
            custom_codes: Some(PageCustomCodes {
                custom_code1: Some("code 1".to_string()),
                custom_code6: Some("code 6".to_string()),
                ..Default::default()
            }),
            ..new_page(&short_name)
        };
        pages.create(&request).unwrap();

        let page = pages.retrieve(&short_name).unwrap();
        assert_eq!(page.company_appeal_id, Some(200), "{format}");
        assert_eq!(page.page_summary_what, request.page_summary_what, "{format}");
        assert_eq!(page.page_summary_why, request.page_summary_why, "{format}");
        assert_eq!(page.theme, request.theme, "{format}");
        assert_eq!(page.custom_codes, request.custom_codes, "{format}");
        assert_eq!(page.page_creator_name, "Api Tests", "{format}");
        assert!(!page.sms_code.is_empty(), "{format}");
    }
}

#[test]
fn remembered_person_by_existing_id_links_to_that_person() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = unique_name();
        let request = RegisterPageRequest {
            activity_type: Some(ActivityType::InMemory),
            remembered_person_reference: Some(RememberedPersonReference {
                relationship: Some("Mother".to_string()),
                remembered_person: RememberedPerson {
                    id: Some(55),
                    ..Default::default()
                },
            }),
            ..new_page(&short_name)
        };
        pages.create(&request).unwrap();

        let summary = pages
            .retrieve(&short_name)
            .unwrap()
            .remembered_person_summary
            .unwrap();
        assert_eq!(summary.id, 55, "{format}");
        let next = summary.next.unwrap();
        assert!(next.uri.contains("remember/55"), "{format}: {}", next.uri);
    }
}

#[test]
fn event_page_rejects_conflicting_event_id_before_sending() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = unique_name();
        let request = RegisterPageRequest {
            event_id: Some(42),
            ..new_page(&short_name)
        };

        let err = pages.create_for_event("spring-run", &request).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)), "{format}: {err:?}");
        assert_eq!(err.status(), Some(400));
        assert!(pages.retrieve(&short_name).unwrap_err().is_not_found());

        let created = pages
            .create_for_event("spring-run", &new_page(&short_name))
            .unwrap();
        assert!(created.page_id > 0);
    }
}

#[test]
fn duplicate_short_name_is_bad_request() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = registered(&pages);
        let err = pages.create(&new_page(&short_name)).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }), "{format}: {err:?}");
    }
}

#[test]
fn bad_credentials_are_forbidden() {
    let base = spawn_server();
    for format in FORMATS {
        let config = ClientConfig::new(&base, "app-key")
            .with_format(format)
            .with_credentials(DEFAULT_USERNAME, "badPassword");
        let pages = PageApi::from_config(&config).unwrap();
        let err = pages.create(&new_page(&unique_name())).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }), "{format}: {err:?}");

        let err = pages
            .upload_image(SEEDED_PAGE, "Finish", b"\x89PNG\r\n", "image/png")
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }), "{format}: {err:?}");
    }
}

#[test]
fn missing_credentials_are_an_error_response() {
    let base = spawn_server();
    let pages = PageApi::from_config(&ClientConfig::new(&base, "app-key")).unwrap();
    let err = pages.create(&new_page(&unique_name())).unwrap_err();
    assert!(matches!(err, ApiError::ErrorResponse { status: 401, .. }), "{err:?}");
}

#[test]
fn unknown_domain_is_bad_request() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = PageApi::from_config(&config(&base, format).with_domain("incorrect.com")).unwrap();
        let err = pages.create(&new_page(&unique_name())).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }), "{format}: {err:?}");
    }
}

// --- lookup ---

#[test]
fn missing_page_is_not_found() {
    let base = spawn_server();
    for format in FORMATS {
        let err = api(&base, format).retrieve(&unique_name()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }), "{format}: {err:?}");
        assert_eq!(err.status(), Some(404));
    }
}

#[test]
fn seeded_page_lists_its_teams() {
    let base = spawn_server();
    for format in FORMATS {
        let page = api(&base, format).retrieve(SEEDED_PAGE).unwrap();
        assert!(!page.teams.is_empty(), "{format}");
        assert_eq!(page.teams[0].short_name, SEEDED_TEAM, "{format}");
        assert!(!page.teams[0].name.is_empty(), "{format}");
    }
}

#[test]
fn operations_on_missing_page_are_not_found() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let missing = unique_name();

        let err = pages
            .upload_image(&missing, "Finish", b"\x89PNG\r\n", "image/png")
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }), "{format}: {err:?}");

        let err = pages.delete_page_update(&missing, SEEDED_UPDATE_ID).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }), "{format}: {err:?}");

        let err = pages.delete_fundraising_page_attribution(&missing).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }), "{format}: {err:?}");

        let image = AddFundraisingPageImageRequest {
            page_short_name: missing.clone(),
            url: "http://images.example.org/start.jpg".to_string(),
            caption: "Start".to_string(),
            is_default: false,
        };
        let err = pages.add_image(&image).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }), "{format}: {err:?}");
    }
}

#[test]
fn list_all_contains_own_pages_only() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = registered(&pages);
        let mine = pages.list_all().unwrap();
        assert!(mine.iter().any(|p| p.page_short_name == short_name), "{format}");
        assert!(mine.iter().all(|p| p.page_short_name != SEEDED_PAGE), "{format}");
    }
}

#[test]
fn suggestions_are_unregistered() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let suggested = pages.suggest_page_short_names("Community Fun Run").unwrap();
        assert!(!suggested.names.is_empty(), "{format}");
        for name in &suggested.names {
            assert!(!pages.is_page_short_name_registered(name, None).unwrap(), "{format}: {name}");
        }
    }
}

#[test]
fn registered_probe_answers_true_false_and_rejects_unknown_domain() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        assert!(pages.is_page_short_name_registered(SEEDED_PAGE, None).unwrap());
        assert!(!pages.is_page_short_name_registered(&unique_name(), None).unwrap());
        assert!(!pages
            .is_page_short_name_registered(SEEDED_PAGE, Some(RFL_DOMAIN))
            .unwrap());

        let err = pages
            .is_page_short_name_registered(SEEDED_PAGE, Some("incorrect.com"))
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }), "{format}: {err:?}");
    }
}

// --- mutations ---

#[test]
fn story_update_and_cancel() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = registered(&pages);

        assert!(pages.update_story(&short_name, "Day one of training").unwrap());
        assert_eq!(pages.retrieve(&short_name).unwrap().story, "Day one of training");

        assert!(pages.cancel_page(&short_name).unwrap());
        assert_eq!(pages.retrieve(&short_name).unwrap().status, "Cancelled");
    }
}

#[test]
fn free_text_whitespace_survives_both_formats() {
    let base = spawn_server();
    let story = "  padded story\n  line two  ";
    let message = " spaced message ";
    let mut seen = Vec::new();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = registered(&pages);

        pages.update_story(&short_name, story).unwrap();
        let update = UpdateRequest {
            message: message.to_string(),
            created_date: None,
        };
        pages.page_updates_add_post(&short_name, &update).unwrap();

        let page = pages.retrieve(&short_name).unwrap();
        let updates = pages.page_updates(&short_name).unwrap();
        assert_eq!(page.story, story, "{format}");
        assert_eq!(updates[0].message, message, "{format}");
        seen.push((page.story, updates[0].message.clone()));
    }
    assert_eq!(seen[0], seen[1]);
}

#[test]
fn non_owner_cannot_touch_seeded_page() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let err = pages.update_story(SEEDED_PAGE, "hijacked").unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }), "{format}: {err:?}");
        let err = pages.cancel_page(SEEDED_PAGE).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }), "{format}: {err:?}");
    }
}

#[test]
fn images_and_videos() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = registered(&pages);

        let image = AddFundraisingPageImageRequest {
            page_short_name: short_name.clone(),
            url: "http://images.example.org/start.jpg".to_string(),
            caption: "Start".to_string(),
            is_default: true,
        };
        let added = pages.add_image(&image).unwrap();
        assert!(!added.next.rel.is_empty(), "{format}");
        assert!(pages
            .upload_image(&short_name, "Finish", b"\x89PNG\r\n", "image/png")
            .unwrap());

        let images = pages.get_images(&short_name).unwrap();
        assert_eq!(images.len(), 2, "{format}");
        assert!(images.iter().any(|i| i.caption == "Start" && i.is_default));

        assert!(pages.delete_image(&short_name, &image.url).unwrap());
        assert_eq!(pages.get_images(&short_name).unwrap().len(), 1, "{format}");

        let video = AddFundraisingPageVideoRequest {
            page_short_name: short_name.clone(),
            url: "http://www.youtube.com/watch?v=MSxjbF18BBM".to_string(),
            caption: "Training".to_string(),
        };
        let added = pages.add_video(&video).unwrap();
        assert!(!added.next.rel.is_empty(), "{format}");
        let videos = pages.get_videos(&short_name).unwrap();
        assert_eq!(videos.len(), 1, "{format}");
        assert_eq!(videos[0].url, video.url);
    }
}

#[test]
fn invalid_media_is_bad_request() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = registered(&pages);

        let err = pages
            .upload_image(&short_name, "Notes", b"plain text", "text/plain")
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }), "{format}: {err:?}");

        let empty = AddFundraisingPageImageRequest {
            page_short_name: short_name.clone(),
            ..Default::default()
        };
        let err = pages.add_image(&empty).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }), "{format}: {err:?}");

        let no_caption = AddFundraisingPageVideoRequest {
            page_short_name: short_name.clone(),
            url: "http://www.youtube.com/watch?v=MSxjbF18BBM".to_string(),
            caption: String::new(),
        };
        let err = pages.add_video(&no_caption).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }), "{format}: {err:?}");
    }
}

#[test]
fn updates_lifecycle() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = registered(&pages);

        let update = UpdateRequest {
            message: "Halfway there".to_string(),
            created_date: None,
        };
        assert!(pages.page_updates_add_post(&short_name, &update).unwrap());

        let updates = pages.page_updates(&short_name).unwrap();
        assert_eq!(updates.len(), 1, "{format}");
        let id = updates[0].id.unwrap();
        assert_eq!(pages.page_update(&short_name, id).unwrap().message, "Halfway there");

        assert!(pages.delete_page_update(&short_name, id).unwrap());
        assert!(pages.page_update(&short_name, id).unwrap_err().is_not_found());
    }
}

#[test]
fn seeded_update_is_public() {
    let base = spawn_server();
    for format in FORMATS {
        let update = api(&base, format)
            .page_update(SEEDED_PAGE, SEEDED_UPDATE_ID)
            .unwrap();
        assert_eq!(update.id, Some(SEEDED_UPDATE_ID), "{format}");
    }
}

#[test]
fn attribution_lifecycle() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let short_name = registered(&pages);

        for team in ["Team A", "Team B"] {
            assert!(pages
                .append_to_fundraising_page_attribution(&short_name, &attribution(team))
                .unwrap());
        }
        assert_eq!(
            pages.fundraising_page_attribution(&short_name).unwrap().attribution,
            "Team A, Team B"
        );

        assert!(pages
            .update_fundraising_page_attribution(&short_name, &attribution("Team C"))
            .unwrap());
        assert_eq!(
            pages.fundraising_page_attribution(&short_name).unwrap().attribution,
            "Team C"
        );

        assert!(pages.delete_fundraising_page_attribution(&short_name).unwrap());
        assert_eq!(pages.fundraising_page_attribution(&short_name).unwrap().attribution, "");
    }
}

#[test]
fn donations_for_seeded_page() {
    let base = spawn_server();
    for format in FORMATS {
        let pages = api(&base, format);
        let all = pages.retrieve_donations_for_page(SEEDED_PAGE).unwrap();
        assert_eq!(all.donations.len(), 2, "{format}");
        assert_eq!(all.pagination.total_results, 2, "{format}");

        let by_ref = pages
            .retrieve_donations_for_page_by_reference(SEEDED_PAGE, SEEDED_DONATION_REF)
            .unwrap();
        assert_eq!(by_ref.donations.len(), 1, "{format}");
        assert_eq!(by_ref.donations[0].donation_ref.as_deref(), Some(SEEDED_DONATION_REF));
    }
}

#[test]
fn formats_agree_on_the_same_page() {
    let base = spawn_server();
    let json = api(&base, WireFormat::Json).retrieve(SEEDED_PAGE).unwrap();
    let xml = api(&base, WireFormat::Xml).retrieve(SEEDED_PAGE).unwrap();
    assert_eq!(json, xml);
}
