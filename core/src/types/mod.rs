//! Domain DTOs for the fundraising API.
//!
//! # Design
//! These types mirror the remote wire contract and are defined independently
//! of the mock-server crate; integration tests catch schema drift. Field
//! names are camelCase in both wire formats. Optional fields are skipped when
//! absent so XML bodies never carry empty placeholder elements.

pub mod donation;
pub mod media;
pub mod page;
pub mod remember;
pub mod update;

pub use donation::{Donation, FundraisingPageDonations, Pagination};
pub use media::{
    AddFundraisingPageImageRequest, AddFundraisingPageVideoRequest, AddMediaResponse,
    FundraisingPageImage, FundraisingPageVideo,
};
pub use page::{
    ActivityType, EventRef, FundraisingPage, FundraisingPageSummary, FundraisingPageTeam, Link,
    PageCustomCodes, PageMedia, PageTheme, RegisterPageRequest, RegisterPageResponse,
    StoryUpdateRequest, SuggestedNames,
};
pub use remember::{RememberedPerson, RememberedPersonReference, RememberedPersonSummary};
pub use update::{FundraisingPageAttribution, PageUpdate, UpdateRequest};
