//! Project repository: projects, CAPX/OPX line items and BD expenditures.
//!
//! Also implements the core [`ProjectDocumentRepository`] seam used by the
//! document service for receipt and contract uploads.

use chrono::Utc;
use misboard_core::document::{BdExpenditure, DocumentError, ProjectDocumentRepository};
use misboard_core::project::{BdExpenditureInput, LineItemInput, LineKind, NewProject, ProjectDetails};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{bd_expenditures, project_line_items, projects};

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectRepoError {
    /// Project not found.
    #[error("Project not found: {0}")]
    NotFound(String),

    /// Project id already taken.
    #[error("Project {0} already exists")]
    Duplicate(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Project repository.
#[derive(Debug, Clone, Copy)]
pub struct ProjectRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectRepository<'a> {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if the id is taken, or a database error.
    pub async fn create(&self, project: NewProject) -> Result<projects::Model, ProjectRepoError> {
        if projects::Entity::find_by_id(project.id.clone())
            .one(self.db)
            .await?
            .is_some()
        {
            return Err(ProjectRepoError::Duplicate(project.id));
        }

        let now = Utc::now().into();
        let details = project.details;
        let active = projects::ActiveModel {
            id: Set(project.id),
            name: Set(details.name),
            client: Set(details.client),
            description: Set(details.description),
            status: Set(details.status.as_str().to_string()),
            start_date: Set(details.start_date),
            end_date: Set(details.end_date),
            budget: Set(details.budget),
            contract_key: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(active.insert(self.db).await?)
    }

    /// Gets a project by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist.
    pub async fn get(&self, id: &str) -> Result<projects::Model, ProjectRepoError> {
        projects::Entity::find_by_id(id.to_string())
            .one(self.db)
            .await?
            .ok_or_else(|| ProjectRepoError::NotFound(id.to_string()))
    }

    /// Lists projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_all(&self) -> Result<Vec<projects::Model>, ProjectRepoError> {
        Ok(projects::Entity::find()
            .order_by_desc(projects::Column::CreatedAt)
            .all(self.db)
            .await?)
    }

    /// Replaces the editable fields of a project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist.
    pub async fn update(
        &self,
        id: &str,
        details: ProjectDetails,
    ) -> Result<projects::Model, ProjectRepoError> {
        let project = self.get(id).await?;

        let mut active: projects::ActiveModel = project.into();
        active.name = Set(details.name);
        active.client = Set(details.client);
        active.description = Set(details.description);
        active.status = Set(details.status.as_str().to_string());
        active.start_date = Set(details.start_date);
        active.end_date = Set(details.end_date);
        active.budget = Set(details.budget);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(self.db).await?)
    }

    /// Adds a CAPX or OPX line item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist.
    pub async fn add_line_item(
        &self,
        project_id: &str,
        kind: LineKind,
        input: LineItemInput,
    ) -> Result<project_line_items::Model, ProjectRepoError> {
        self.ensure_exists(project_id).await?;

        let active = project_line_items::ActiveModel {
            project_id: Set(project_id.to_string()),
            kind: Set(kind.as_str().to_string()),
            item: Set(input.item),
            amount: Set(input.amount),
            vendor: Set(input.vendor),
            incurred_on: Set(input.incurred_on),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        Ok(active.insert(self.db).await?)
    }

    /// Lists a project's CAPX or OPX line items.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist.
    pub async fn list_line_items(
        &self,
        project_id: &str,
        kind: LineKind,
    ) -> Result<Vec<project_line_items::Model>, ProjectRepoError> {
        self.ensure_exists(project_id).await?;

        Ok(project_line_items::Entity::find()
            .filter(project_line_items::Column::ProjectId.eq(project_id))
            .filter(project_line_items::Column::Kind.eq(kind.as_str()))
            .order_by_asc(project_line_items::Column::Id)
            .all(self.db)
            .await?)
    }

    /// Lists a project's BD expenditures.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist.
    pub async fn list_bd_expenditures(
        &self,
        project_id: &str,
    ) -> Result<Vec<BdExpenditure>, ProjectRepoError> {
        self.ensure_exists(project_id).await?;

        let models = bd_expenditures::Entity::find()
            .filter(bd_expenditures::Column::ProjectId.eq(project_id))
            .order_by_asc(bd_expenditures::Column::Id)
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(to_bd_expenditure).collect())
    }

    async fn ensure_exists(&self, project_id: &str) -> Result<(), ProjectRepoError> {
        let count = projects::Entity::find_by_id(project_id.to_string())
            .count(self.db)
            .await?;
        if count == 0 {
            return Err(ProjectRepoError::NotFound(project_id.to_string()));
        }
        Ok(())
    }
}

impl ProjectDocumentRepository for ProjectRepository<'_> {
    async fn project_exists(&self, project_id: &str) -> Result<bool, DocumentError> {
        let count = projects::Entity::find_by_id(project_id.to_string())
            .count(self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create_bd_expenditure(
        &self,
        project_id: &str,
        input: BdExpenditureInput,
        receipt_key: String,
    ) -> Result<BdExpenditure, DocumentError> {
        let active = bd_expenditures::ActiveModel {
            project_id: Set(project_id.to_string()),
            description: Set(input.description),
            amount: Set(input.amount),
            spent_on: Set(input.spent_on),
            receipt_key: Set(receipt_key),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active
            .insert(self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        Ok(to_bd_expenditure(model))
    }

    async fn replace_contract(
        &self,
        project_id: &str,
        contract_key: String,
    ) -> Result<Option<String>, DocumentError> {
        let project = projects::Entity::find_by_id(project_id.to_string())
            .one(self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?
            .ok_or_else(|| DocumentError::ProjectNotFound(project_id.to_string()))?;

        let previous = project.contract_key.clone();
        let mut active: projects::ActiveModel = project.into();
        active.contract_key = Set(Some(contract_key));
        active.updated_at = Set(Utc::now().into());
        active
            .update(self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        Ok(previous)
    }
}

fn to_bd_expenditure(model: bd_expenditures::Model) -> BdExpenditure {
    BdExpenditure {
        id: model.id,
        project_id: model.project_id,
        description: model.description,
        amount: model.amount,
        spent_on: model.spent_on,
        receipt_key: model.receipt_key,
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
