use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables in dependency order (referenced tables first), then call `build()`.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, GalleryItem};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(GalleryItem)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the SeaORM entity using SQLite syntax,
    /// including foreign keys declared by `belongs_to` relations.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user table and every gallery table.
    ///
    /// Tables: User, GalleryItem, GalleryVote, GalleryFavorite, GalleryComment
    pub fn with_gallery_tables(self) -> Self {
        self.with_table(User)
            .with_table(GalleryItem)
            .with_table(GalleryVote)
            .with_table(GalleryFavorite)
            .with_table(GalleryComment)
    }

    /// Adds the user table and every port battle table.
    ///
    /// Tables: User, PortBattle, FleetSetup, FleetRole, Signup
    pub fn with_port_battle_tables(self) -> Self {
        self.with_table(User)
            .with_table(PortBattle)
            .with_table(FleetSetup)
            .with_table(FleetRole)
            .with_table(Signup)
    }

    /// Adds the admin tooling tables that have no dependencies.
    ///
    /// Tables: AuditLog, BlacklistEntry
    pub fn with_admin_tables(self) -> Self {
        self.with_table(AuditLog).with_table(BlacklistEntry)
    }

    /// Adds the complete schema.
    ///
    /// Used by tests that cross feature boundaries, such as GDPR export and erasure.
    pub fn with_all_tables(self) -> Self {
        self.with_gallery_tables()
            .with_table(PortBattle)
            .with_table(FleetSetup)
            .with_table(FleetRole)
            .with_table(Signup)
            .with_table(GdprRequest)
            .with_admin_tables()
    }

    /// Builds the test context and creates the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
