use std::sync::Arc;

use tracing::info;

use super::error::{EntityKind, ServiceError};
use crate::assistance::domain::{
    Applicant, ApplicantPatch, Family, NewApplicant, NewRelationship, Relationship,
    RelationshipType,
};
use crate::assistance::ids::ApplicantId;
use crate::assistance::repository::ApplicantRepository;

/// Applicant lifecycle plus family links.
pub struct ApplicantService<A> {
    applicants: Arc<A>,
}

impl<A> ApplicantService<A>
where
    A: ApplicantRepository + 'static,
{
    pub fn new(applicants: Arc<A>) -> Self {
        Self { applicants }
    }

    pub fn get(&self, id: ApplicantId) -> Result<Applicant, ServiceError> {
        self.applicants
            .get_applicant(id)?
            .ok_or(ServiceError::NotFound(EntityKind::Applicant))
    }

    pub fn list(&self) -> Result<Vec<Applicant>, ServiceError> {
        Ok(self.applicants.list_applicants()?)
    }

    pub fn create(&self, applicant: NewApplicant) -> Result<Applicant, ServiceError> {
        let created = self.applicants.create_applicant(applicant)?;
        info!(applicant_id = %created.id, "applicant created");
        Ok(created)
    }

    pub fn update(
        &self,
        id: ApplicantId,
        patch: ApplicantPatch,
    ) -> Result<Applicant, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::NoUpdateFields);
        }

        let updated = self
            .applicants
            .update_applicant(id, &patch)?
            .ok_or(ServiceError::NotFound(EntityKind::Applicant))?;
        info!(applicant_id = %id, "applicant updated");
        Ok(updated)
    }

    pub fn delete(&self, id: ApplicantId) -> Result<(), ServiceError> {
        if !self.applicants.delete_applicant(id)? {
            return Err(ServiceError::NotFound(EntityKind::Applicant));
        }
        info!(applicant_id = %id, "applicant deleted");
        Ok(())
    }

    pub fn family(&self, id: ApplicantId) -> Result<Family, ServiceError> {
        self.get(id)?;
        Ok(self.applicants.get_applicant_family(id)?)
    }

    /// Record that `member_id` is the applicant's `relationship_type`.
    ///
    /// Links always join two distinct applicants.
    pub fn link_family_member(
        &self,
        id: ApplicantId,
        member_id: ApplicantId,
        relationship_type: RelationshipType,
    ) -> Result<Relationship, ServiceError> {
        if id == member_id {
            return Err(ServiceError::SelfRelationship);
        }
        self.get(id)?;
        self.get(member_id)?;

        let relationship = self.applicants.add_relationship(NewRelationship {
            applicant_a_id: id,
            applicant_b_id: member_id,
            relationship_type,
        })?;
        info!(
            applicant_id = %id,
            member_id = %member_id,
            relationship = %relationship_type,
            "family member linked"
        );
        Ok(relationship)
    }
}
