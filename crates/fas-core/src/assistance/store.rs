use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{
    Applicant, ApplicantPatch, Application, Benefit, BenefitPatch, CriteriaPatch, Family,
    NewApplicant, NewApplication, NewBenefit, NewRelationship, NewScheme, NewSchemeCriteria,
    Relationship, Scheme, SchemeCriteria, SchemePatch,
};
use super::ids::{
    ApplicantId, ApplicationId, BenefitId, CriteriaId, RelationshipId, SchemeId,
};
use super::repository::{
    ApplicantRepository, ApplicationRepository, RepositoryError, SchemeRepository,
};

/// Stored row with a soft-delete marker that never leaks into domain records.
#[derive(Debug, Clone)]
struct Row<T> {
    record: T,
    deleted_at: Option<DateTime<Utc>>,
}

impl<T> Row<T> {
    fn new(record: T) -> Self {
        Self {
            record,
            deleted_at: None,
        }
    }

    fn live(&self) -> Option<&T> {
        match self.deleted_at {
            None => Some(&self.record),
            Some(_) => None,
        }
    }

    fn live_mut(&mut self) -> Option<&mut T> {
        match self.deleted_at {
            None => Some(&mut self.record),
            Some(_) => None,
        }
    }

    /// Sets the marker; `false` if the row was already deleted.
    fn soft_delete(&mut self, now: DateTime<Utc>) -> bool {
        if self.deleted_at.is_some() {
            return false;
        }
        self.deleted_at = Some(now);
        true
    }
}

#[derive(Debug, Default)]
struct StoreState {
    applicants: HashMap<ApplicantId, Row<Applicant>>,
    relationships: HashMap<RelationshipId, Row<Relationship>>,
    schemes: HashMap<SchemeId, Row<Scheme>>,
    benefits: HashMap<BenefitId, Row<Benefit>>,
    criteria: HashMap<CriteriaId, Row<SchemeCriteria>>,
    applications: HashMap<ApplicationId, Row<Application>>,
}

impl StoreState {
    fn assemble_scheme(&self, scheme: &Scheme) -> Scheme {
        let mut benefits: Vec<Benefit> = self
            .benefits
            .values()
            .filter_map(Row::live)
            .filter(|benefit| benefit.scheme_id == scheme.id)
            .cloned()
            .collect();
        benefits.sort_by_key(|benefit| (benefit.created_at, benefit.id));

        let mut criteria: Vec<SchemeCriteria> = self
            .criteria
            .values()
            .filter_map(Row::live)
            .filter(|criteria| criteria.scheme_id == scheme.id)
            .cloned()
            .collect();
        criteria.sort_by_key(|criteria| (criteria.created_at, criteria.id));

        Scheme {
            benefits,
            criteria,
            ..scheme.clone()
        }
    }
}

/// Mutex-guarded in-process adapter implementing every repository port.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }
}

fn sorted_live<K, T, F, O>(rows: &HashMap<K, Row<T>>, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> O,
    O: Ord,
{
    let mut records: Vec<T> = rows.values().filter_map(Row::live).cloned().collect();
    records.sort_by_key(|record| key(record));
    records
}

fn soft_delete<K, T>(rows: &mut HashMap<K, Row<T>>, id: &K) -> bool
where
    K: std::hash::Hash + Eq,
{
    rows.get_mut(id)
        .is_some_and(|row| row.soft_delete(Utc::now()))
}

impl ApplicantRepository for InMemoryStore {
    fn get_applicant(&self, id: ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.applicants.get(&id).and_then(Row::live).cloned())
    }

    fn list_applicants(&self) -> Result<Vec<Applicant>, RepositoryError> {
        let state = self.lock()?;
        Ok(sorted_live(&state.applicants, |applicant| {
            (applicant.created_at, applicant.id)
        }))
    }

    fn create_applicant(&self, applicant: NewApplicant) -> Result<Applicant, RepositoryError> {
        let now = Utc::now();
        let record = Applicant {
            id: ApplicantId::new_v4(),
            name: applicant.name,
            employment_status: applicant.employment_status,
            marital_status: applicant.marital_status,
            sex: applicant.sex,
            date_of_birth: Some(applicant.date_of_birth),
            created_at: now,
            updated_at: now,
        };

        let mut state = self.lock()?;
        state.applicants.insert(record.id, Row::new(record.clone()));
        Ok(record)
    }

    fn update_applicant(
        &self,
        id: ApplicantId,
        patch: &ApplicantPatch,
    ) -> Result<Option<Applicant>, RepositoryError> {
        let mut state = self.lock()?;
        let Some(applicant) = state.applicants.get_mut(&id).and_then(Row::live_mut) else {
            return Ok(None);
        };
        applicant.apply(patch, Utc::now());
        Ok(Some(applicant.clone()))
    }

    fn delete_applicant(&self, id: ApplicantId) -> Result<bool, RepositoryError> {
        let mut state = self.lock()?;
        Ok(soft_delete(&mut state.applicants, &id))
    }

    fn get_applicant_family(&self, id: ApplicantId) -> Result<Family, RepositoryError> {
        let state = self.lock()?;
        let family = state
            .relationships
            .values()
            .filter_map(Row::live)
            .filter(|relationship| relationship.applicant_a_id == id)
            .filter_map(|relationship| {
                state
                    .applicants
                    .get(&relationship.applicant_b_id)
                    .and_then(Row::live)
                    .map(|member| (relationship.relationship_type, member.clone()))
            })
            .collect();
        Ok(family)
    }

    fn add_relationship(
        &self,
        relationship: NewRelationship,
    ) -> Result<Relationship, RepositoryError> {
        let mut state = self.lock()?;
        let duplicate = state.relationships.values().filter_map(Row::live).any(|existing| {
            existing.applicant_a_id == relationship.applicant_a_id
                && existing.applicant_b_id == relationship.applicant_b_id
                && existing.relationship_type == relationship.relationship_type
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }

        let now = Utc::now();
        let record = Relationship {
            id: RelationshipId::new_v4(),
            applicant_a_id: relationship.applicant_a_id,
            applicant_b_id: relationship.applicant_b_id,
            relationship_type: relationship.relationship_type,
            created_at: now,
            updated_at: now,
        };
        state.relationships.insert(record.id, Row::new(record.clone()));
        Ok(record)
    }
}

impl SchemeRepository for InMemoryStore {
    fn get_scheme(&self, id: SchemeId) -> Result<Option<Scheme>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .schemes
            .get(&id)
            .and_then(Row::live)
            .map(|scheme| state.assemble_scheme(scheme)))
    }

    fn list_schemes(&self) -> Result<Vec<Scheme>, RepositoryError> {
        let state = self.lock()?;
        Ok(sorted_live(&state.schemes, |scheme| (scheme.created_at, scheme.id))
            .iter()
            .map(|scheme| state.assemble_scheme(scheme))
            .collect())
    }

    fn create_scheme(&self, scheme: NewScheme) -> Result<Scheme, RepositoryError> {
        let now = Utc::now();
        let record = Scheme {
            id: SchemeId::new_v4(),
            name: scheme.name,
            benefits: Vec::new(),
            criteria: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let mut state = self.lock()?;
        state.schemes.insert(record.id, Row::new(record.clone()));
        Ok(record)
    }

    fn update_scheme(
        &self,
        id: SchemeId,
        patch: &SchemePatch,
    ) -> Result<Option<Scheme>, RepositoryError> {
        let mut state = self.lock()?;
        let updated = match state.schemes.get_mut(&id).and_then(Row::live_mut) {
            Some(scheme) => {
                if let Some(name) = &patch.name {
                    scheme.name = name.clone();
                }
                scheme.updated_at = Utc::now();
                scheme.clone()
            }
            None => return Ok(None),
        };
        Ok(Some(state.assemble_scheme(&updated)))
    }

    fn delete_scheme(&self, id: SchemeId) -> Result<bool, RepositoryError> {
        let mut state = self.lock()?;
        Ok(soft_delete(&mut state.schemes, &id))
    }

    fn get_benefit(&self, id: BenefitId) -> Result<Option<Benefit>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.benefits.get(&id).and_then(Row::live).cloned())
    }

    fn add_benefit(&self, benefit: NewBenefit) -> Result<Benefit, RepositoryError> {
        let now = Utc::now();
        let record = Benefit {
            id: BenefitId::new_v4(),
            scheme_id: benefit.scheme_id,
            name: benefit.name,
            amount: benefit.amount,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.lock()?;
        state.benefits.insert(record.id, Row::new(record.clone()));
        Ok(record)
    }

    fn update_benefit(
        &self,
        id: BenefitId,
        patch: &BenefitPatch,
    ) -> Result<Option<Benefit>, RepositoryError> {
        let mut state = self.lock()?;
        let Some(benefit) = state.benefits.get_mut(&id).and_then(Row::live_mut) else {
            return Ok(None);
        };
        benefit.apply(patch, Utc::now());
        Ok(Some(benefit.clone()))
    }

    fn delete_benefit(&self, id: BenefitId) -> Result<bool, RepositoryError> {
        let mut state = self.lock()?;
        Ok(soft_delete(&mut state.benefits, &id))
    }

    fn get_criteria(&self, id: CriteriaId) -> Result<Option<SchemeCriteria>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.criteria.get(&id).and_then(Row::live).cloned())
    }

    fn add_criteria(
        &self,
        criteria: NewSchemeCriteria,
    ) -> Result<SchemeCriteria, RepositoryError> {
        let now = Utc::now();
        let record = SchemeCriteria {
            id: CriteriaId::new_v4(),
            scheme_id: criteria.scheme_id,
            name: criteria.name,
            value: criteria.value,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.lock()?;
        state.criteria.insert(record.id, Row::new(record.clone()));
        Ok(record)
    }

    fn update_criteria(
        &self,
        id: CriteriaId,
        patch: &CriteriaPatch,
    ) -> Result<Option<SchemeCriteria>, RepositoryError> {
        let mut state = self.lock()?;
        let Some(criteria) = state.criteria.get_mut(&id).and_then(Row::live_mut) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            criteria.name = name.clone();
        }
        if let Some(value) = &patch.value {
            criteria.value = value.clone();
        }
        if let Some(scheme_id) = patch.scheme_id {
            criteria.scheme_id = scheme_id;
        }
        criteria.updated_at = Utc::now();
        Ok(Some(criteria.clone()))
    }

    fn delete_criteria(&self, id: CriteriaId) -> Result<bool, RepositoryError> {
        let mut state = self.lock()?;
        Ok(soft_delete(&mut state.criteria, &id))
    }
}

impl ApplicationRepository for InMemoryStore {
    fn get_application(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.applications.get(&id).and_then(Row::live).cloned())
    }

    fn list_applications(&self) -> Result<Vec<Application>, RepositoryError> {
        let state = self.lock()?;
        Ok(sorted_live(&state.applications, |application| {
            (application.created_at, application.id)
        }))
    }

    fn create_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, RepositoryError> {
        let now = Utc::now();
        let record = Application {
            id: ApplicationId::new_v4(),
            applicant_id: application.applicant_id,
            scheme_id: application.scheme_id,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.lock()?;
        state.applications.insert(record.id, Row::new(record.clone()));
        Ok(record)
    }

    fn update_application(
        &self,
        id: ApplicationId,
        application: NewApplication,
    ) -> Result<Option<Application>, RepositoryError> {
        let mut state = self.lock()?;
        let Some(record) = state.applications.get_mut(&id).and_then(Row::live_mut) else {
            return Ok(None);
        };
        record.applicant_id = application.applicant_id;
        record.scheme_id = application.scheme_id;
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    fn delete_application(&self, id: ApplicationId) -> Result<bool, RepositoryError> {
        let mut state = self.lock()?;
        Ok(soft_delete(&mut state.applications, &id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::assistance::domain::{EmploymentStatus, MaritalStatus, RelationshipType, Sex};

    fn new_applicant(name: &str) -> NewApplicant {
        NewApplicant {
            name: name.to_string(),
            employment_status: EmploymentStatus::Employed,
            marital_status: MaritalStatus::Married,
            sex: Sex::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 14).expect("valid date"),
        }
    }

    #[test]
    fn deleted_applicants_disappear_from_reads() {
        let store = InMemoryStore::new();
        let applicant = store.create_applicant(new_applicant("Mary")).expect("insert");

        assert!(store.delete_applicant(applicant.id).expect("delete"));
        assert!(store.get_applicant(applicant.id).expect("read").is_none());
        assert!(store.list_applicants().expect("list").is_empty());
        assert!(!store.delete_applicant(applicant.id).expect("second delete"));
        assert!(store
            .update_applicant(
                applicant.id,
                &ApplicantPatch {
                    name: Some("Ghost".to_string()),
                    ..ApplicantPatch::default()
                }
            )
            .expect("update")
            .is_none());
    }

    #[test]
    fn family_skips_deleted_members() {
        let store = InMemoryStore::new();
        let parent = store.create_applicant(new_applicant("Mary")).expect("insert");
        let child = store.create_applicant(new_applicant("Gwen")).expect("insert");
        let spouse = store.create_applicant(new_applicant("James")).expect("insert");

        for (member, relationship_type) in [
            (child.id, RelationshipType::Child),
            (spouse.id, RelationshipType::Spouse),
        ] {
            store
                .add_relationship(NewRelationship {
                    applicant_a_id: parent.id,
                    applicant_b_id: member,
                    relationship_type,
                })
                .expect("link");
        }

        let family = store.get_applicant_family(parent.id).expect("family");
        assert!(family.has(RelationshipType::Child));
        assert!(family.has(RelationshipType::Spouse));

        store.delete_applicant(child.id).expect("delete child");
        let family = store.get_applicant_family(parent.id).expect("family");
        assert!(!family.has(RelationshipType::Child));
        assert_eq!(family.members(RelationshipType::Spouse)[0].id, spouse.id);
    }

    #[test]
    fn duplicate_relationships_conflict() {
        let store = InMemoryStore::new();
        let a = store.create_applicant(new_applicant("Mary")).expect("insert");
        let b = store.create_applicant(new_applicant("Gwen")).expect("insert");
        let link = NewRelationship {
            applicant_a_id: a.id,
            applicant_b_id: b.id,
            relationship_type: RelationshipType::Child,
        };

        store.add_relationship(link).expect("first link");
        assert_eq!(store.add_relationship(link), Err(RepositoryError::Conflict));
    }

    #[test]
    fn scheme_reads_only_include_live_children() {
        let store = InMemoryStore::new();
        let scheme = store
            .create_scheme(NewScheme {
                name: "Retrenchment Assistance Scheme".to_string(),
            })
            .expect("insert");
        let kept = store
            .add_criteria(NewSchemeCriteria {
                scheme_id: scheme.id,
                name: "employment_status".to_string(),
                value: "unemployed".to_string(),
            })
            .expect("criteria");
        let dropped = store
            .add_criteria(NewSchemeCriteria {
                scheme_id: scheme.id,
                name: "age".to_string(),
                value: ">=60".to_string(),
            })
            .expect("criteria");
        store
            .add_benefit(NewBenefit {
                scheme_id: scheme.id,
                name: "CDC Vouchers".to_string(),
                amount: 500.0,
            })
            .expect("benefit");

        store.delete_criteria(dropped.id).expect("delete");

        let loaded = store.get_scheme(scheme.id).expect("read").expect("present");
        assert_eq!(loaded.criteria, vec![kept]);
        assert_eq!(loaded.benefits.len(), 1);

        store.delete_scheme(scheme.id).expect("delete scheme");
        assert!(store.get_scheme(scheme.id).expect("read").is_none());
        assert!(store.list_schemes().expect("list").is_empty());
    }
}
