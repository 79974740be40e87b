pub use super::audit_log::Entity as AuditLog;
pub use super::blacklist_entry::Entity as BlacklistEntry;
pub use super::fleet_role::Entity as FleetRole;
pub use super::fleet_setup::Entity as FleetSetup;
pub use super::gallery_comment::Entity as GalleryComment;
pub use super::gallery_favorite::Entity as GalleryFavorite;
pub use super::gallery_item::Entity as GalleryItem;
pub use super::gallery_vote::Entity as GalleryVote;
pub use super::gdpr_request::Entity as GdprRequest;
pub use super::port_battle::Entity as PortBattle;
pub use super::signup::Entity as Signup;
pub use super::user::Entity as User;
