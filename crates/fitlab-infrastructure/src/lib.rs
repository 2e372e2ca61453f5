pub mod config_service;
pub mod file_image_source;
pub mod http_generation_service;
pub mod logging;
pub mod memory_draft_repository;
pub mod memory_feed;
pub mod navigator;
pub mod paths;
pub mod stub_generation_service;

pub use crate::config_service::ConfigService;
pub use crate::file_image_source::FileImageSource;
pub use crate::http_generation_service::HttpGenerationService;
pub use crate::memory_draft_repository::InMemoryDraftRepository;
pub use crate::memory_feed::InMemoryFeed;
pub use crate::navigator::RecordingNavigator;
pub use crate::stub_generation_service::StubGenerationService;
