//! In-memory mock of the fundraising pages API.
//!
//! Serves every endpoint the client SDK uses, in JSON or XML depending on
//! the caller's `Accept`/`Content-Type`, with basic-auth ownership checks and
//! domain validation. Starts with one seeded public page.

pub mod model;
pub mod store;
pub mod wire;

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use tokio::{net::TcpListener, sync::RwLock};

use model::{
    AddMedia, AddMediaResponse, Attribution, FundraisingPage, Image, Link, Media, NewUpdate,
    PageDonations, PageSummary, PageUpdate, Pagination, RegisterPage, RegisterPageResponse,
    RememberedPersonSummary, StoryUpdate, SuggestedNames, Video,
};
use store::{MockUser, StoredPage};
use wire::{Auth, Ctx, Failure};

pub use store::{MockConfig, Store};

type Reply = Result<Response, Failure>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<MockConfig>,
    pub store: Arc<RwLock<Store>>,
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let store = Store::seeded(config.default_domain());
    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(RwLock::new(store)),
    };
    Router::new()
        .route("/{app}/v1/fundraising/pages", get(list_pages).post(register_page))
        .route("/{app}/v1/fundraising/pages/suggest", get(suggest_names))
        .route("/{app}/v1/event/{event_ref}/pages", post(register_event_page))
        .route("/{app}/v1/fundraising/pages/{short}", get(get_page).delete(cancel_page))
        .route("/{app}/v1/fundraising/pages/{short}/registered", get(is_registered))
        .route("/{app}/v1/fundraising/pages/{short}/story", put(update_story))
        .route(
            "/{app}/v1/fundraising/pages/{short}/images",
            get(list_images).post(add_image).put(upload_image).delete(delete_image),
        )
        .route("/{app}/v1/fundraising/pages/{short}/videos", get(list_videos).post(add_video))
        .route("/{app}/v1/fundraising/pages/{short}/updates", get(list_updates).post(add_update))
        .route(
            "/{app}/v1/fundraising/pages/{short}/updates/{id}",
            get(get_update).delete(delete_update),
        )
        .route(
            "/{app}/v1/fundraising/pages/{short}/attribution",
            get(get_attribution)
                .post(append_attribution)
                .put(replace_attribution)
                .delete(delete_attribution),
        )
        .route("/{app}/v1/fundraising/pages/{short}/donations", get(list_donations))
        .route(
            "/{app}/v1/fundraising/pages/{short}/donations/ref/{reference}",
            get(list_donations_by_ref),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

fn require_user<'a>(ctx: &Ctx, config: &'a MockConfig) -> Result<&'a MockUser, Failure> {
    match &ctx.auth {
        Auth::Anonymous => Err(ctx.fail(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "credentials required",
        )),
        Auth::Basic { username, password } => config
            .user(username, password)
            .ok_or_else(|| ctx.forbidden("invalid credentials")),
        Auth::Malformed => Err(ctx.forbidden("malformed authorization header")),
    }
}

fn check_domain(ctx: &Ctx, config: &MockConfig, domain: Option<&str>) -> Result<String, Failure> {
    match domain {
        Some(d) if config.knows_domain(d) => Ok(d.to_lowercase()),
        Some(d) => Err(ctx.bad_request(format!("unknown domain: {d}"))),
        None => Ok(config.default_domain().to_lowercase()),
    }
}

fn find<'s>(ctx: &Ctx, store: &'s Store, short: &str) -> Result<&'s StoredPage, Failure> {
    store
        .pages
        .get(short)
        .ok_or_else(|| ctx.not_found(format!("page {short} not found")))
}

/// Resolve the page for a mutation by its owner.
fn owned<'s>(
    ctx: &Ctx,
    config: &MockConfig,
    store: &'s mut Store,
    short: &str,
) -> Result<&'s mut StoredPage, Failure> {
    let user = require_user(ctx, config)?;
    let page = store
        .pages
        .get_mut(short)
        .ok_or_else(|| ctx.not_found(format!("page {short} not found")))?;
    if !page.owner.eq_ignore_ascii_case(&user.username) {
        return Err(ctx.forbidden(format!("{} does not own {short}", user.username)));
    }
    Ok(page)
}

/// Bodiless 200 for mutations that only acknowledge.
fn ok() -> Reply {
    Ok(StatusCode::OK.into_response())
}

// ---------------------------------------------------------------------------
// Registration and lookup
// ---------------------------------------------------------------------------

async fn register_page(
    State(state): State<AppState>,
    Path(app): Path<String>,
    ctx: Ctx,
    body: Bytes,
) -> Reply {
    register(&state, &app, None, &ctx, &body).await
}

async fn register_event_page(
    State(state): State<AppState>,
    Path((app, event_ref)): Path<(String, String)>,
    ctx: Ctx,
    body: Bytes,
) -> Reply {
    register(&state, &app, Some(event_ref), &ctx, &body).await
}

async fn register(
    state: &AppState,
    app: &str,
    event_ref: Option<String>,
    ctx: &Ctx,
    body: &[u8],
) -> Reply {
    let user = require_user(ctx, &state.config)?;
    let domain = check_domain(ctx, &state.config, ctx.domain.as_deref())?;
    let request: RegisterPage = ctx.decode(body)?;

    if event_ref.is_some() && request.event_id.is_some() {
        return Err(ctx.bad_request("eventId cannot be combined with an event reference"));
    }
    let short = request.page_short_name.trim().to_string();
    if short.is_empty() {
        return Err(ctx.bad_request("pageShortName is required"));
    }
    if request.page_title.trim().is_empty() {
        return Err(ctx.bad_request("pageTitle is required"));
    }
    if request.target_amount.is_some_and(|t| t < 0.0) {
        return Err(ctx.bad_request("targetAmount must not be negative"));
    }

    let mut store = state.store.write().await;
    if store.pages.contains_key(&short) {
        return Err(ctx.bad_request(format!("page short name {short} is already registered")));
    }

    let page_id = store.next_page_id();
    let remembered_person_summary = match &request.remembered_person_reference {
        Some(reference) => {
            let person = &reference.remembered_person;
            let id = match person.id {
                Some(id) => id,
                None => store.next_person_id(),
            };
            let name = match (&person.first_name, &person.last_name) {
                (Some(first), Some(last)) => format!("{first} {last}"),
                (Some(name), None) | (None, Some(name)) => name.clone(),
                (None, None) => format!("Remembered person {id}"),
            };
            Some(RememberedPersonSummary {
                id,
                name,
                next: Link {
                    rel: "remember".to_string(),
                    uri: ctx.link(&format!("/{app}/v1/remember/{id}")),
                    media_type: None,
                },
            })
        }
        None => None,
    };

    let page = FundraisingPage {
        page_id,
        page_short_name: short.clone(),
        page_title: request.page_title,
        activity_type: request.activity_type,
        event_name: request.event_name,
        event_date: request.event_date,
        event_id: request.event_id,
        charity_id: request.charity_id,
        company_appeal_id: request.company_appeal_id,
        target_amount: request.target_amount,
        story: String::new(),
        page_summary_what: request.page_summary_what,
        page_summary_why: request.page_summary_why,
        total_raised_online: 0.0,
        grand_total_raised_excluding_gift_aid: 0.0,
        total_raised_sms: "0.00".to_string(),
        currency_code: "GBP".to_string(),
        sms_code: format!("FUND{page_id:02}"),
        page_creator_name: user.display_name.clone(),
        status: "Active".to_string(),
        theme: request.theme,
        custom_codes: request.custom_codes,
        media: Media::default(),
        teams: Vec::new(),
        attribution: request.attribution.filter(|a| !a.trim().is_empty()),
        remembered_person_summary,
    };
    store.pages.insert(
        short.clone(),
        StoredPage {
            page,
            owner: user.username.clone(),
            domain,
            updates: Vec::new(),
            donations: Vec::new(),
        },
    );
    tracing::info!(page = %short, page_id, event_ref = ?event_ref, "page registered");

    let response = RegisterPageResponse {
        page_id,
        sign_on_url: ctx.link(&format!("/signon?page={short}")),
        next: Link {
            rel: "fundraisingpage".to_string(),
            uri: ctx.link(&format!("/{app}/v1/fundraising/pages/{short}")),
            media_type: None,
        },
    };
    ctx.respond(StatusCode::CREATED, "registerPageResponse", &response)
}

async fn list_pages(State(state): State<AppState>, ctx: Ctx) -> Reply {
    let user = require_user(&ctx, &state.config)?;
    let store = state.store.read().await;
    let mut pages: Vec<PageSummary> = store
        .pages
        .values()
        .filter(|p| p.owner.eq_ignore_ascii_case(&user.username))
        .map(|p| PageSummary {
            page_id: p.page.page_id,
            page_short_name: p.page.page_short_name.clone(),
            page_title: p.page.page_title.clone(),
            page_status: p.page.status.clone(),
            target_amount: p.page.target_amount,
            raised_amount: p.page.total_raised_online,
        })
        .collect();
    pages.sort_by_key(|p| p.page_id);
    ctx.respond_list("pages", &pages)
}

async fn get_page(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
) -> Reply {
    let store = state.store.read().await;
    let page = find(&ctx, &store, &short)?;
    ctx.respond(StatusCode::OK, "fundraisingPage", &page.page)
}

async fn suggest_names(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    ctx: Ctx,
) -> Reply {
    let preferred = params.get("preferredName").map(String::as_str).unwrap_or("");
    let store = state.store.read().await;
    let names = store.suggest(preferred, 5);
    if names.is_empty() {
        return Err(ctx.bad_request("preferredName is required"));
    }
    ctx.respond(StatusCode::OK, "suggestedNames", &SuggestedNames { names })
}

async fn is_registered(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    ctx: Ctx,
) -> Reply {
    let requested = params.get("domain").map(String::as_str);
    if let Some(domain) = requested {
        check_domain(&ctx, &state.config, Some(domain))?;
    }
    let store = state.store.read().await;
    let page = find(&ctx, &store, &short)?;
    match requested {
        Some(domain) if !page.domain.eq_ignore_ascii_case(domain) => {
            Err(ctx.not_found(format!("page {short} not registered on {domain}")))
        }
        _ => ok(),
    }
}

async fn cancel_page(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
) -> Reply {
    let mut store = state.store.write().await;
    let page = owned(&ctx, &state.config, &mut store, &short)?;
    page.page.status = "Cancelled".to_string();
    tracing::info!(page = %short, "page cancelled");
    ok()
}

async fn update_story(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
    body: Bytes,
) -> Reply {
    let mut store = state.store.write().await;
    let page = owned(&ctx, &state.config, &mut store, &short)?;
    let update: StoryUpdate = ctx.decode(&body)?;
    page.page.story = update.story_supplement;
    ok()
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

fn validate_media(ctx: &Ctx, media: &AddMedia) -> Result<(), Failure> {
    if media.url.trim().is_empty() {
        return Err(ctx.bad_request("url is required"));
    }
    if media.caption.trim().is_empty() {
        return Err(ctx.bad_request("caption is required"));
    }
    Ok(())
}

async fn list_images(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
) -> Reply {
    let store = state.store.read().await;
    let page = find(&ctx, &store, &short)?;
    ctx.respond_list("images", &page.page.media.images)
}

async fn add_image(
    State(state): State<AppState>,
    Path((app, short)): Path<(String, String)>,
    ctx: Ctx,
    body: Bytes,
) -> Reply {
    let mut store = state.store.write().await;
    let page = owned(&ctx, &state.config, &mut store, &short)?;
    let media: AddMedia = ctx.decode(&body)?;
    validate_media(&ctx, &media)?;

    let images = &mut page.page.media.images;
    if media.is_default {
        images.iter_mut().for_each(|i| i.is_default = false);
    }
    images.push(Image {
        caption: media.caption,
        url: media.url,
        absolute_url: None,
        is_default: media.is_default,
    });
    media_added(&ctx, &app, &short, "images")
}

async fn upload_image(
    State(state): State<AppState>,
    Path((app, short)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    ctx: Ctx,
    body: Bytes,
) -> Reply {
    let mut store = state.store.write().await;
    let page = owned(&ctx, &state.config, &mut store, &short)?;

    let caption = params.get("caption").map(|c| c.trim()).unwrap_or("");
    if caption.is_empty() {
        return Err(ctx.bad_request("caption is required"));
    }
    let extension = match ctx.content_type.as_deref().and_then(|ct| ct.strip_prefix("image/")) {
        Some(subtype) if !subtype.is_empty() => {
            subtype.split(';').next().unwrap_or("img").trim().to_string()
        }
        _ => return Err(ctx.bad_request("content type must be an image type")),
    };
    if body.is_empty() {
        return Err(ctx.bad_request("image body is empty"));
    }

    let url = format!(
        "http://images.example.org/{short}/{}.{extension}",
        uuid::Uuid::new_v4()
    );
    tracing::debug!(page = %short, bytes = body.len(), %url, "image uploaded");
    page.page.media.images.push(Image {
        caption: caption.to_string(),
        url,
        absolute_url: None,
        is_default: false,
    });
    media_added(&ctx, &app, &short, "images")
}

async fn delete_image(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    ctx: Ctx,
) -> Reply {
    let mut store = state.store.write().await;
    let page = owned(&ctx, &state.config, &mut store, &short)?;
    let url = params.get("url").map(String::as_str).unwrap_or("");
    let images = &mut page.page.media.images;
    let position = images
        .iter()
        .position(|i| i.url == url || i.absolute_url.as_deref() == Some(url))
        .ok_or_else(|| ctx.not_found(format!("image {url} not found")))?;
    images.remove(position);
    ok()
}

async fn list_videos(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
) -> Reply {
    let store = state.store.read().await;
    let page = find(&ctx, &store, &short)?;
    ctx.respond_list("videos", &page.page.media.videos)
}

async fn add_video(
    State(state): State<AppState>,
    Path((app, short)): Path<(String, String)>,
    ctx: Ctx,
    body: Bytes,
) -> Reply {
    let mut store = state.store.write().await;
    let page = owned(&ctx, &state.config, &mut store, &short)?;
    let media: AddMedia = ctx.decode(&body)?;
    validate_media(&ctx, &media)?;
    page.page.media.videos.push(Video {
        caption: media.caption,
        url: media.url,
    });
    media_added(&ctx, &app, &short, "videos")
}

fn media_added(ctx: &Ctx, app: &str, short: &str, kind: &str) -> Reply {
    let response = AddMediaResponse {
        next: Link {
            rel: kind.to_string(),
            uri: ctx.link(&format!("/{app}/v1/fundraising/pages/{short}/{kind}")),
            media_type: None,
        },
    };
    ctx.respond(StatusCode::CREATED, "addMediaResponse", &response)
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

async fn list_updates(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
) -> Reply {
    let store = state.store.read().await;
    let page = find(&ctx, &store, &short)?;
    ctx.respond_list("updates", &page.updates)
}

async fn get_update(
    State(state): State<AppState>,
    Path((_app, short, id)): Path<(String, String, i64)>,
    ctx: Ctx,
) -> Reply {
    let store = state.store.read().await;
    let page = find(&ctx, &store, &short)?;
    let update = page
        .updates
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| ctx.not_found(format!("update {id} not found")))?;
    ctx.respond(StatusCode::OK, "pageUpdate", update)
}

async fn add_update(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
    body: Bytes,
) -> Reply {
    let mut store = state.store.write().await;
    owned(&ctx, &state.config, &mut store, &short)?;
    let request: NewUpdate = ctx.decode(&body)?;
    if request.message.trim().is_empty() {
        return Err(ctx.bad_request("message is required"));
    }
    let update = PageUpdate {
        id: store.next_update_id(),
        message: request.message,
        created_date: request.created_date.unwrap_or_else(Utc::now),
    };
    if let Some(page) = store.pages.get_mut(&short) {
        page.updates.push(update.clone());
    }
    ctx.respond(StatusCode::CREATED, "pageUpdate", &update)
}

async fn delete_update(
    State(state): State<AppState>,
    Path((_app, short, id)): Path<(String, String, i64)>,
    ctx: Ctx,
) -> Reply {
    let mut store = state.store.write().await;
    let page = owned(&ctx, &state.config, &mut store, &short)?;
    let before = page.updates.len();
    page.updates.retain(|u| u.id != id);
    if page.updates.len() == before {
        return Err(ctx.not_found(format!("update {id} not found")));
    }
    ok()
}

// ---------------------------------------------------------------------------
// Attribution
// ---------------------------------------------------------------------------

async fn get_attribution(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
) -> Reply {
    let store = state.store.read().await;
    let page = find(&ctx, &store, &short)?;
    let attribution = Attribution {
        attribution: page.page.attribution.clone().unwrap_or_default(),
    };
    ctx.respond(StatusCode::OK, "attribution", &attribution)
}

async fn append_attribution(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
    body: Bytes,
) -> Reply {
    let mut store = state.store.write().await;
    let page = owned(&ctx, &state.config, &mut store, &short)?;
    let request: Attribution = ctx.decode(&body)?;
    let addition = request.attribution.trim();
    if addition.is_empty() {
        return Err(ctx.bad_request("attribution is required"));
    }
    page.page.attribution = Some(match page.page.attribution.take() {
        Some(existing) if !existing.is_empty() => format!("{existing}, {addition}"),
        _ => addition.to_string(),
    });
    ok()
}

async fn replace_attribution(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
    body: Bytes,
) -> Reply {
    let mut store = state.store.write().await;
    let page = owned(&ctx, &state.config, &mut store, &short)?;
    let request: Attribution = ctx.decode(&body)?;
    if request.attribution.trim().is_empty() {
        return Err(ctx.bad_request("attribution is required"));
    }
    page.page.attribution = Some(request.attribution.trim().to_string());
    ok()
}

async fn delete_attribution(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
) -> Reply {
    let mut store = state.store.write().await;
    let page = owned(&ctx, &state.config, &mut store, &short)?;
    page.page.attribution = None;
    ok()
}

// ---------------------------------------------------------------------------
// Donations
// ---------------------------------------------------------------------------

fn donations_reply(ctx: &Ctx, page: &StoredPage, reference: Option<&str>) -> Reply {
    let donations: Vec<_> = page
        .donations
        .iter()
        .filter(|d| reference.is_none() || d.donation_ref.as_deref() == reference)
        .cloned()
        .collect();
    if let Some(reference) = reference {
        if donations.is_empty() {
            return Err(ctx.not_found(format!("no donations with reference {reference}")));
        }
    }
    let count = donations.len() as u32;
    let body = PageDonations {
        page_short_name: page.page.page_short_name.clone(),
        donations,
        pagination: Pagination {
            page_number: 1,
            page_size_requested: 25,
            page_size_returned: count,
            total_pages: 1,
            total_results: count,
        },
    };
    ctx.respond(StatusCode::OK, "fundraisingPageDonations", &body)
}

async fn list_donations(
    State(state): State<AppState>,
    Path((_app, short)): Path<(String, String)>,
    ctx: Ctx,
) -> Reply {
    let store = state.store.read().await;
    donations_reply(&ctx, find(&ctx, &store, &short)?, None)
}

async fn list_donations_by_ref(
    State(state): State<AppState>,
    Path((_app, short, reference)): Path<(String, String, String)>,
    ctx: Ctx,
) -> Reply {
    let store = state.store.read().await;
    donations_reply(&ctx, find(&ctx, &store, &short)?, Some(&reference))
}
