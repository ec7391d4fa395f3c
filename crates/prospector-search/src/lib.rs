//! Prospector Search - web search and profile discovery collaborators.
//!
//! Both clients sit on the Google Custom Search JSON API. Construction fails
//! without credentials; searches themselves never fail and report problems
//! as empty results.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod google;
pub mod profiles;

pub use error::{Result, SearchError};
pub use google::{
    company_domain, link_host, GoogleSearchClient, SearchBackend, SearchHit, MAX_PAGE_SIZE,
    MAX_RESULTS,
};
pub use profiles::{profile_name_from_url, profile_queries, ProfileFinder, ProfileHit};
