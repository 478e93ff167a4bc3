//! Staff-facing review panel: directory listing, detail views, printable
//! reports, edit-by-deletion, and the session gate in front of it all.

pub mod directory;
pub mod domain;
pub mod gateway;
pub mod report;
pub mod router;
pub mod session;

pub use directory::{AdminDirectory, DirectoryError};
pub use domain::{
    AdditionalInfo, BrandVoiceInfo, BusinessDetail, BusinessId, BusinessStatus, BusinessSummary,
    ContentInfo, GoalsInfo, LoginRequest, MarketingInfo, SocialMediaInfo, TargetInfo, WorkflowInfo,
};
pub use gateway::{
    DirectoryGateway, GatewayError, HttpAdminClient, SessionGateway, BUSINESS_DETAIL_PATH,
    LIST_BUSINESSES_PATH, LOGIN_PATH, SESSION_PATH,
};
pub use report::render_business_report;
pub use router::{admin_router, AdminPanelService};
pub use session::{LoginError, SessionGate};
