//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` convenience
//! function for quick default creation. Factories do not create their parents; use the
//! `helpers` module when a full hierarchy is needed.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let item = factory::gallery_item::GalleryItemFactory::new(&db, user.id)
//!     .approved()
//!     .build()
//!     .await?;
//!
//! let (admin, battle, fleet, role) =
//!     factory::helpers::create_battle_with_role(&db).await?;
//! ```

pub mod blacklist_entry;
pub mod fleet_role;
pub mod fleet_setup;
pub mod gallery_item;
pub mod helpers;
pub mod port_battle;
pub mod signup;
pub mod user;

pub use fleet_role::create_fleet_role;
pub use fleet_setup::create_fleet_setup;
pub use gallery_item::create_gallery_item;
pub use port_battle::create_port_battle;
pub use signup::create_signup;
pub use user::create_user;
