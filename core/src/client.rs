//! Fundraising page resource client.
//!
//! # Design
//! `PageApi` holds only an `HttpChannel` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` without touching the network, and the operation
//! itself, which sends the request through the channel and decodes the
//! result. Mutations the API acknowledges without a payload return `true`
//! on any 2xx response.

use crate::channel::HttpChannel;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{
    AddFundraisingPageImageRequest, AddFundraisingPageVideoRequest, AddMediaResponse, EventRef,
    FundraisingPage, FundraisingPageAttribution, FundraisingPageDonations, FundraisingPageImage,
    FundraisingPageSummary, FundraisingPageVideo, PageUpdate, RegisterPageRequest,
    RegisterPageResponse, StoryUpdateRequest, SuggestedNames, UpdateRequest,
};

const PAGES: [&str; 3] = ["v1", "fundraising", "pages"];

/// Synchronous client for the fundraising page resources.
#[derive(Debug, Clone)]
pub struct PageApi {
    channel: HttpChannel,
}

impl PageApi {
    pub fn new(channel: HttpChannel) -> Self {
        Self { channel }
    }

    /// Client over the default `ureq` transport.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(HttpChannel::new(config)?))
    }

    pub fn channel(&self) -> &HttpChannel {
        &self.channel
    }

    // -----------------------------------------------------------------------
    // Registration and lookup
    // -----------------------------------------------------------------------

    pub fn build_create(
        &self,
        request: &RegisterPageRequest,
        event_reference: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(&request.page_short_name)?;
        match request.event_ref(event_reference)? {
            EventRef::ByReference(reference) => self.channel.request_with_body(
                HttpMethod::Post,
                &["v1", "event", reference.as_str(), "pages"],
                request,
            ),
            EventRef::ById(_) | EventRef::None => {
                self.channel.request_with_body(HttpMethod::Post, &PAGES, request)
            }
        }
    }

    /// Register a new page.
    pub fn create(&self, request: &RegisterPageRequest) -> Result<RegisterPageResponse, ApiError> {
        let req = self.build_create(request, None)?;
        self.channel.execute(&req)
    }

    /// Register a new page under the event identified by `event_reference`.
    ///
    /// Fails with `ApiError::Validation` before any request is sent when
    /// `request.event_id` is also set.
    pub fn create_for_event(
        &self,
        event_reference: &str,
        request: &RegisterPageRequest,
    ) -> Result<RegisterPageResponse, ApiError> {
        let req = self.build_create(request, Some(event_reference))?;
        self.channel.execute(&req)
    }

    pub fn build_retrieve(&self, short_name: &str) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        Ok(self.channel.request(HttpMethod::Get, &page_path(short_name, &[])))
    }

    pub fn retrieve(&self, short_name: &str) -> Result<FundraisingPage, ApiError> {
        self.channel.execute(&self.build_retrieve(short_name)?)
    }

    pub fn build_list_all(&self) -> HttpRequest {
        self.channel.request(HttpMethod::Get, &PAGES)
    }

    /// Pages owned by the authenticated user.
    pub fn list_all(&self) -> Result<Vec<FundraisingPageSummary>, ApiError> {
        self.channel.execute_list(&self.build_list_all())
    }

    pub fn build_suggest_page_short_names(&self, desired_name: &str) -> HttpRequest {
        self.channel
            .request(HttpMethod::Get, &["v1", "fundraising", "pages", "suggest"])
            .query("preferredName", desired_name)
    }

    pub fn suggest_page_short_names(&self, desired_name: &str) -> Result<SuggestedNames, ApiError> {
        self.channel
            .execute(&self.build_suggest_page_short_names(desired_name))
    }

    pub fn build_is_page_short_name_registered(
        &self,
        short_name: &str,
        domain: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        let req = self
            .channel
            .request(HttpMethod::Get, &page_path(short_name, &["registered"]));
        Ok(match domain {
            Some(domain) => req.query("domain", domain),
            None => req,
        })
    }

    /// Whether `short_name` is taken, optionally on a specific domain.
    ///
    /// A 404 means "not registered"; every other failure is returned.
    pub fn is_page_short_name_registered(
        &self,
        short_name: &str,
        domain: Option<&str>,
    ) -> Result<bool, ApiError> {
        let req = self.build_is_page_short_name_registered(short_name, domain)?;
        match self.channel.send(&req) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn build_cancel_page(&self, short_name: &str) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        Ok(self.channel.request(HttpMethod::Delete, &page_path(short_name, &[])))
    }

    pub fn cancel_page(&self, short_name: &str) -> Result<bool, ApiError> {
        self.acknowledge(self.build_cancel_page(short_name)?)
    }

    pub fn build_update_story(
        &self,
        short_name: &str,
        story: &str,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        let body = StoryUpdateRequest {
            story_supplement: story.to_string(),
        };
        self.channel
            .request_with_body(HttpMethod::Put, &page_path(short_name, &["story"]), &body)
    }

    pub fn update_story(&self, short_name: &str, story: &str) -> Result<bool, ApiError> {
        self.acknowledge(self.build_update_story(short_name, story)?)
    }

    // -----------------------------------------------------------------------
    // Media
    // -----------------------------------------------------------------------

    pub fn build_upload_image(
        &self,
        short_name: &str,
        caption: &str,
        image: &[u8],
        content_type: &str,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        Ok(self
            .channel
            .request_raw(
                HttpMethod::Put,
                &page_path(short_name, &["images"]),
                image.to_vec(),
                content_type,
            )
            .query("caption", caption))
    }

    /// Upload raw image bytes (e.g. `image/jpeg`) to a page.
    pub fn upload_image(
        &self,
        short_name: &str,
        caption: &str,
        image: &[u8],
        content_type: &str,
    ) -> Result<bool, ApiError> {
        self.acknowledge(self.build_upload_image(short_name, caption, image, content_type)?)
    }

    pub fn build_add_image(
        &self,
        request: &AddFundraisingPageImageRequest,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(&request.page_short_name)?;
        self.channel.request_with_body(
            HttpMethod::Post,
            &page_path(&request.page_short_name, &["images"]),
            request,
        )
    }

    pub fn add_image(
        &self,
        request: &AddFundraisingPageImageRequest,
    ) -> Result<AddMediaResponse, ApiError> {
        self.channel.execute(&self.build_add_image(request)?)
    }

    pub fn build_add_video(
        &self,
        request: &AddFundraisingPageVideoRequest,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(&request.page_short_name)?;
        self.channel.request_with_body(
            HttpMethod::Post,
            &page_path(&request.page_short_name, &["videos"]),
            request,
        )
    }

    pub fn add_video(
        &self,
        request: &AddFundraisingPageVideoRequest,
    ) -> Result<AddMediaResponse, ApiError> {
        self.channel.execute(&self.build_add_video(request)?)
    }

    pub fn build_get_images(&self, short_name: &str) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        Ok(self.channel.request(HttpMethod::Get, &page_path(short_name, &["images"])))
    }

    pub fn get_images(&self, short_name: &str) -> Result<Vec<FundraisingPageImage>, ApiError> {
        self.channel.execute_list(&self.build_get_images(short_name)?)
    }

    pub fn build_get_videos(&self, short_name: &str) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        Ok(self.channel.request(HttpMethod::Get, &page_path(short_name, &["videos"])))
    }

    pub fn get_videos(&self, short_name: &str) -> Result<Vec<FundraisingPageVideo>, ApiError> {
        self.channel.execute_list(&self.build_get_videos(short_name)?)
    }

    pub fn build_delete_image(
        &self,
        short_name: &str,
        image_url: &str,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        if image_url.trim().is_empty() {
            return Err(ApiError::Validation("image url must not be empty".to_string()));
        }
        Ok(self
            .channel
            .request(HttpMethod::Delete, &page_path(short_name, &["images"]))
            .query("url", image_url))
    }

    /// Remove the image whose URL is `image_url`.
    pub fn delete_image(&self, short_name: &str, image_url: &str) -> Result<bool, ApiError> {
        self.acknowledge(self.build_delete_image(short_name, image_url)?)
    }

    // -----------------------------------------------------------------------
    // Updates
    // -----------------------------------------------------------------------

    pub fn build_page_updates(&self, short_name: &str) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        Ok(self.channel.request(HttpMethod::Get, &page_path(short_name, &["updates"])))
    }

    pub fn page_updates(&self, short_name: &str) -> Result<Vec<PageUpdate>, ApiError> {
        self.channel.execute_list(&self.build_page_updates(short_name)?)
    }

    pub fn build_page_update(
        &self,
        short_name: &str,
        update_id: i64,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        let id = update_id.to_string();
        Ok(self
            .channel
            .request(HttpMethod::Get, &page_path(short_name, &["updates", id.as_str()])))
    }

    pub fn page_update(&self, short_name: &str, update_id: i64) -> Result<PageUpdate, ApiError> {
        self.channel.execute(&self.build_page_update(short_name, update_id)?)
    }

    pub fn build_page_updates_add_post(
        &self,
        short_name: &str,
        update: &UpdateRequest,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        self.channel
            .request_with_body(HttpMethod::Post, &page_path(short_name, &["updates"]), update)
    }

    pub fn page_updates_add_post(
        &self,
        short_name: &str,
        update: &UpdateRequest,
    ) -> Result<bool, ApiError> {
        self.acknowledge(self.build_page_updates_add_post(short_name, update)?)
    }

    pub fn build_delete_page_update(
        &self,
        short_name: &str,
        update_id: i64,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        let id = update_id.to_string();
        Ok(self
            .channel
            .request(HttpMethod::Delete, &page_path(short_name, &["updates", id.as_str()])))
    }

    pub fn delete_page_update(&self, short_name: &str, update_id: i64) -> Result<bool, ApiError> {
        self.acknowledge(self.build_delete_page_update(short_name, update_id)?)
    }

    // -----------------------------------------------------------------------
    // Attribution
    // -----------------------------------------------------------------------

    fn build_attribution(
        &self,
        method: HttpMethod,
        short_name: &str,
        body: Option<&FundraisingPageAttribution>,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        let path = page_path(short_name, &["attribution"]);
        match body {
            Some(body) => self.channel.request_with_body(method, &path, body),
            None => Ok(self.channel.request(method, &path)),
        }
    }

    pub fn build_append_to_fundraising_page_attribution(
        &self,
        short_name: &str,
        request: &FundraisingPageAttribution,
    ) -> Result<HttpRequest, ApiError> {
        self.build_attribution(HttpMethod::Post, short_name, Some(request))
    }

    /// Append text to the existing attribution.
    pub fn append_to_fundraising_page_attribution(
        &self,
        short_name: &str,
        request: &FundraisingPageAttribution,
    ) -> Result<bool, ApiError> {
        self.acknowledge(self.build_append_to_fundraising_page_attribution(short_name, request)?)
    }

    pub fn build_fundraising_page_attribution(
        &self,
        short_name: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.build_attribution(HttpMethod::Get, short_name, None)
    }

    pub fn fundraising_page_attribution(
        &self,
        short_name: &str,
    ) -> Result<FundraisingPageAttribution, ApiError> {
        self.channel
            .execute(&self.build_fundraising_page_attribution(short_name)?)
    }

    pub fn build_update_fundraising_page_attribution(
        &self,
        short_name: &str,
        request: &FundraisingPageAttribution,
    ) -> Result<HttpRequest, ApiError> {
        self.build_attribution(HttpMethod::Put, short_name, Some(request))
    }

    /// Replace the attribution.
    pub fn update_fundraising_page_attribution(
        &self,
        short_name: &str,
        request: &FundraisingPageAttribution,
    ) -> Result<bool, ApiError> {
        self.acknowledge(self.build_update_fundraising_page_attribution(short_name, request)?)
    }

    pub fn build_delete_fundraising_page_attribution(
        &self,
        short_name: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.build_attribution(HttpMethod::Delete, short_name, None)
    }

    pub fn delete_fundraising_page_attribution(&self, short_name: &str) -> Result<bool, ApiError> {
        self.acknowledge(self.build_delete_fundraising_page_attribution(short_name)?)
    }

    // -----------------------------------------------------------------------
    // Donations
    // -----------------------------------------------------------------------

    pub fn build_retrieve_donations_for_page(
        &self,
        short_name: &str,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        Ok(self
            .channel
            .request(HttpMethod::Get, &page_path(short_name, &["donations"])))
    }

    pub fn retrieve_donations_for_page(
        &self,
        short_name: &str,
    ) -> Result<FundraisingPageDonations, ApiError> {
        self.channel
            .execute(&self.build_retrieve_donations_for_page(short_name)?)
    }

    pub fn build_retrieve_donations_for_page_by_reference(
        &self,
        short_name: &str,
        reference: &str,
    ) -> Result<HttpRequest, ApiError> {
        require_short_name(short_name)?;
        if reference.trim().is_empty() {
            return Err(ApiError::Validation("donation reference must not be empty".to_string()));
        }
        Ok(self.channel.request(
            HttpMethod::Get,
            &page_path(short_name, &["donations", "ref", reference]),
        ))
    }

    /// Donations to a page that carry `reference`.
    pub fn retrieve_donations_for_page_by_reference(
        &self,
        short_name: &str,
        reference: &str,
    ) -> Result<FundraisingPageDonations, ApiError> {
        self.channel
            .execute(&self.build_retrieve_donations_for_page_by_reference(short_name, reference)?)
    }

    fn acknowledge(&self, request: HttpRequest) -> Result<bool, ApiError> {
        self.channel.send(&request).map(|_| true)
    }
}

fn page_path<'a>(short_name: &'a str, rest: &[&'a str]) -> Vec<&'a str> {
    let mut path = PAGES.to_vec();
    path.push(short_name);
    path.extend_from_slice(rest);
    path
}

fn require_short_name(short_name: &str) -> Result<(), ApiError> {
    if short_name.trim().is_empty() {
        return Err(ApiError::Validation("page short name must not be empty".to_string()));
    }
    Ok(())
}
