//! In-process [`Backend`] that behaves like the real horse registry.
//!
//! Used by tests as the remote collaborator. It keeps horses the way the
//! backend stores them (owner/mother/father by id), applies the backend's
//! search, validation and family-tree rules, and records every request it
//! receives so callers can assert how many requests an operation issued.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use model::{Horse, HorseFamilyTree, HorseId, HorseSearch, HorseSuggestionQuery, Owner, OwnerId, Sex};

use crate::backend::Backend;
use crate::error::{ApiError, ApiResult};

const UNPROCESSABLE: u16 = 422;
const CONFLICT: u16 = 409;
const NOT_FOUND: u16 = 404;

#[derive(Clone, Debug)]
struct StoredHorse {
    id: HorseId,
    name: String,
    description: Option<String>,
    date_of_birth: NaiveDate,
    sex: Sex,
    owner_id: Option<OwnerId>,
    mother_id: Option<HorseId>,
    father_id: Option<HorseId>,
}

impl StoredHorse {
    fn to_node(&self) -> HorseFamilyTree {
        HorseFamilyTree {
            id: Some(self.id),
            name: self.name.clone(),
            date_of_birth: self.date_of_birth,
            sex: self.sex,
            mother_id: self.mother_id,
            father_id: self.father_id,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    horses: BTreeMap<HorseId, StoredHorse>,
    owners: BTreeMap<OwnerId, Owner>,
    next_horse_id: HorseId,
    next_owner_id: OwnerId,
    requests: Vec<String>,
}

/// In-memory backend for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, request: String) -> MutexGuard<'_, State> {
        let mut state = self.state();
        state.requests.push(request);
        state
    }

    /// Every request received so far, e.g. `"GET /horses/1"`.
    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }
}

impl State {
    fn owner(&self, id: OwnerId) -> ApiResult<Owner> {
        self.owners
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::backend(NOT_FOUND, format!("No owner with ID {id} found")))
    }

    fn stored(&self, id: HorseId) -> ApiResult<&StoredHorse> {
        self.horses
            .get(&id)
            .ok_or_else(|| ApiError::backend(NOT_FOUND, format!("No horse with ID {id} found")))
    }

    /// Resolve owner and parents, the parents without their own parents.
    fn to_horse(&self, stored: &StoredHorse, with_parents: bool) -> Horse {
        let parent = |id: Option<HorseId>| {
            id.filter(|_| with_parents)
                .and_then(|id| self.horses.get(&id))
                .map(|p| Box::new(self.to_horse(p, false)))
        };
        Horse {
            id: Some(stored.id),
            name: stored.name.clone(),
            description: stored.description.clone(),
            date_of_birth: stored.date_of_birth,
            sex: stored.sex,
            owner: stored.owner_id.and_then(|id| self.owners.get(&id).cloned()),
            mother: parent(stored.mother_id),
            father: parent(stored.father_id),
        }
    }

    fn check_horse(&self, horse: &Horse, existing: Option<HorseId>) -> ApiResult<()> {
        let mut invalid = Vec::new();
        let mut conflicts = Vec::new();

        if horse.name.trim().is_empty() {
            invalid.push("Horse name cannot be empty".to_string());
        } else if horse.name.chars().count() > 255 {
            invalid.push("Horse name must be shorter than 255 characters".to_string());
        }
        if let Some(description) = &horse.description {
            if description.trim().is_empty() {
                invalid.push("Horse description is given but blank".to_string());
            }
        }

        for (parent_id, expected, label) in [
            (horse.mother_id(), Sex::Female, "mother"),
            (horse.father_id(), Sex::Male, "father"),
        ] {
            let Some(parent_id) = parent_id else {
                continue;
            };
            let parent = self.stored(parent_id)?;
            if parent.sex != expected {
                conflicts.push(match expected {
                    Sex::Female => "Mother has to be female".to_string(),
                    Sex::Male => "Father has to be male".to_string(),
                });
            }
            if parent.date_of_birth >= horse.date_of_birth {
                conflicts.push(format!(
                    "Horse {label} cannot be younger than the horse itself"
                ));
            }
        }

        if let Some(id) = existing {
            let is_mother = self.horses.values().any(|c| c.mother_id == Some(id));
            let is_father = self.horses.values().any(|c| c.father_id == Some(id));
            if (is_mother && horse.sex != Sex::Female) || (is_father && horse.sex != Sex::Male) {
                conflicts.push("Horse is already a parent. Cannot change sex".to_string());
            }
        }

        if let Some(owner_id) = horse.owner_id() {
            self.owner(owner_id)?;
        }

        let action = if existing.is_some() { "update" } else { "create" };
        if !conflicts.is_empty() {
            return Err(ApiError::Backend {
                status: CONFLICT,
                message: format!("Validation of horse to {action} failed"),
                errors: conflicts,
            });
        }
        if !invalid.is_empty() {
            return Err(ApiError::Backend {
                status: UNPROCESSABLE,
                message: format!("Validation of horse to {action} failed"),
                errors: invalid,
            });
        }
        Ok(())
    }

    fn matches(&self, horse: &StoredHorse, search: &HorseSearch) -> bool {
        if let Some(name) = &search.name {
            if !contains_ignore_case(&horse.name, name) {
                return false;
            }
        }
        if let Some(description) = &search.description {
            match &horse.description {
                Some(d) if contains_ignore_case(d, description) => {}
                _ => return false,
            }
        }
        if let Some(born_before) = search.born_before {
            if horse.date_of_birth > born_before {
                return false;
            }
        }
        if let Some(sex) = search.sex {
            if horse.sex != sex {
                return false;
            }
        }
        if let Some(owner_name) = &search.owner_name {
            let owner = horse.owner_id.and_then(|id| self.owners.get(&id));
            match owner {
                Some(o) if contains_ignore_case(&o.full_name(), owner_name) => {}
                _ => return false,
            }
        }
        true
    }

    fn collect_ancestors(
        &self,
        id: HorseId,
        depth: u32,
        generations: u32,
        path: &mut Vec<HorseId>,
        out: &mut Vec<HorseFamilyTree>,
    ) {
        if depth >= generations || path.contains(&id) {
            return;
        }
        let Some(horse) = self.horses.get(&id) else {
            return;
        };
        out.push(horse.to_node());
        path.push(id);
        if let Some(mother) = horse.mother_id {
            self.collect_ancestors(mother, depth + 1, generations, path, out);
        }
        if let Some(father) = horse.father_id {
            self.collect_ancestors(father, depth + 1, generations, path, out);
        }
        path.pop();
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_uppercase().contains(&needle.trim().to_uppercase())
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && (2..=6).contains(&tld.len()))
}

impl Backend for MemoryBackend {
    async fn list_horses(&self) -> ApiResult<Vec<Horse>> {
        let state = self.record("GET /horses".to_string());
        Ok(state
            .horses
            .values()
            .map(|h| state.to_horse(h, true))
            .collect())
    }

    async fn search_horses(&self, search: &HorseSearch) -> ApiResult<Vec<Horse>> {
        let state = self.record(format!("GET /horses search {search:?}"));
        Ok(state
            .horses
            .values()
            .filter(|h| state.matches(h, search))
            .map(|h| state.to_horse(h, true))
            .collect())
    }

    async fn suggest_horses(&self, query: &HorseSuggestionQuery) -> ApiResult<Vec<Horse>> {
        let state = self.record(format!(
            "GET /horses?name={}&sex={}&limit={}",
            query.name, query.sex, query.limit
        ));
        Ok(state
            .horses
            .values()
            .filter(|h| h.sex == query.sex && contains_ignore_case(&h.name, &query.name))
            .take(query.limit)
            .map(|h| state.to_horse(h, true))
            .collect())
    }

    async fn get_horse(&self, id: HorseId) -> ApiResult<Horse> {
        let state = self.record(format!("GET /horses/{id}"));
        let stored = state.stored(id)?;
        Ok(state.to_horse(stored, true))
    }

    async fn create_horse(&self, horse: &Horse) -> ApiResult<Horse> {
        let mut state = self.record("POST /horses".to_string());
        state.check_horse(horse, None)?;

        state.next_horse_id += 1;
        let stored = StoredHorse {
            id: state.next_horse_id,
            name: horse.name.clone(),
            description: horse.description.clone(),
            date_of_birth: horse.date_of_birth,
            sex: horse.sex,
            owner_id: horse.owner_id(),
            mother_id: horse.mother_id(),
            father_id: horse.father_id(),
        };
        let created = state.to_horse(&stored, true);
        state.horses.insert(stored.id, stored);
        Ok(created)
    }

    async fn update_horse(&self, id: HorseId, horse: &Horse) -> ApiResult<Horse> {
        let mut state = self.record(format!("PUT /horses/{id}"));
        state.stored(id)?;
        state.check_horse(horse, Some(id))?;

        let stored = StoredHorse {
            id,
            name: horse.name.clone(),
            description: horse.description.clone(),
            date_of_birth: horse.date_of_birth,
            sex: horse.sex,
            owner_id: horse.owner_id(),
            mother_id: horse.mother_id(),
            father_id: horse.father_id(),
        };
        let updated = state.to_horse(&stored, true);
        state.horses.insert(id, stored);
        Ok(updated)
    }

    async fn delete_horse(&self, id: HorseId) -> ApiResult<()> {
        let mut state = self.record(format!("DELETE /horses/{id}"));
        state.stored(id)?;
        state.horses.remove(&id);
        for child in state.horses.values_mut() {
            if child.mother_id == Some(id) {
                child.mother_id = None;
            }
            if child.father_id == Some(id) {
                child.father_id = None;
            }
        }
        Ok(())
    }

    async fn family_tree(&self, id: HorseId, generations: u32) -> ApiResult<Vec<HorseFamilyTree>> {
        let state = self.record(format!("GET /horses/{id}/familytree?generations={generations}"));
        state.stored(id)?;
        let mut nodes = Vec::new();
        state.collect_ancestors(id, 0, generations, &mut Vec::new(), &mut nodes);
        Ok(nodes)
    }

    async fn list_owners(&self) -> ApiResult<Vec<Owner>> {
        let state = self.record("GET /owners".to_string());
        Ok(state.owners.values().cloned().collect())
    }

    async fn search_owners(&self, name: &str, max_amount: usize) -> ApiResult<Vec<Owner>> {
        let state = self.record(format!("GET /owners?name={name}&maxAmount={max_amount}"));
        Ok(state
            .owners
            .values()
            .filter(|o| contains_ignore_case(&o.full_name(), name))
            .take(max_amount)
            .cloned()
            .collect())
    }

    async fn create_owner(&self, owner: &Owner) -> ApiResult<Owner> {
        let mut state = self.record("POST /owners".to_string());

        let mut invalid = Vec::new();
        if owner.first_name.trim().is_empty() {
            invalid.push("Owner first name cannot be empty".to_string());
        }
        if owner.last_name.trim().is_empty() {
            invalid.push("Owner last name cannot be empty".to_string());
        }
        if let Some(email) = &owner.email {
            if email.trim().is_empty() {
                invalid.push("Owner email is given but blank".to_string());
            } else if !is_valid_email(email) {
                invalid.push("Owner email is invalid. Please provide a valid email".to_string());
            } else if state
                .owners
                .values()
                .any(|o| o.email.as_deref() == Some(email.as_str()))
            {
                invalid.push("Email is already used. Please provide another email".to_string());
            }
        }
        if !invalid.is_empty() {
            return Err(ApiError::Backend {
                status: UNPROCESSABLE,
                message: "Validation of owner to create failed".to_string(),
                errors: invalid,
            });
        }

        state.next_owner_id += 1;
        let id = state.next_owner_id;
        let created = Owner {
            id: Some(id),
            ..owner.clone()
        };
        state.owners.insert(id, created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn create(
        backend: &MemoryBackend,
        name: &str,
        born: NaiveDate,
        sex: Sex,
        mother: Option<&Horse>,
        father: Option<&Horse>,
    ) -> Horse {
        let mut horse = Horse::new(name, born, sex);
        horse.mother = mother.cloned().map(Box::new);
        horse.father = father.cloned().map(Box::new);
        backend.create_horse(&horse).await.unwrap()
    }

    /// Three generations: foal <- (mare, stallion), mare <- (granny, grandpa).
    async fn pedigree(backend: &MemoryBackend) -> Vec<Horse> {
        let granny = create(backend, "Granny", date(2000, 1, 1), Sex::Female, None, None).await;
        let grandpa = create(backend, "Grandpa", date(2000, 2, 1), Sex::Male, None, None).await;
        let mare = create(backend, "Mare", date(2008, 1, 1), Sex::Female, Some(&granny), Some(&grandpa)).await;
        let stallion = create(backend, "Stallion", date(2009, 1, 1), Sex::Male, None, None).await;
        let foal = create(backend, "Foal", date(2015, 1, 1), Sex::Female, Some(&mare), Some(&stallion)).await;
        vec![granny, grandpa, mare, stallion, foal]
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_resolves_parents() {
        let backend = MemoryBackend::new();
        let horses = pedigree(&backend).await;

        let foal = &horses[4];
        assert_eq!(foal.id, Some(5));
        assert_eq!(foal.mother.as_ref().unwrap().name, "Mare");
        // Parents come without their own parents.
        assert!(foal.mother.as_ref().unwrap().mother.is_none());

        let fetched = backend.get_horse(5).await.unwrap();
        assert_eq!(&fetched, foal);
    }

    #[tokio::test]
    async fn test_family_tree_respects_generations() {
        let backend = MemoryBackend::new();
        pedigree(&backend).await;

        let ids = |nodes: Vec<HorseFamilyTree>| nodes.into_iter().filter_map(|n| n.id).collect::<Vec<_>>();

        assert_eq!(ids(backend.family_tree(5, 1).await.unwrap()), vec![5]);
        assert_eq!(ids(backend.family_tree(5, 2).await.unwrap()), vec![5, 3, 4]);
        assert_eq!(ids(backend.family_tree(5, 3).await.unwrap()), vec![5, 3, 1, 2, 4]);
        assert_eq!(ids(backend.family_tree(5, 10).await.unwrap()).len(), 5);
        assert!(backend.family_tree(5, 0).await.unwrap().is_empty());
        assert!(backend.family_tree(99, 3).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_search_by_sex_and_owner() {
        let backend = MemoryBackend::new();
        let owner = backend.create_owner(&Owner::new("Ada", "Byron")).await.unwrap();
        pedigree(&backend).await;
        let owned = Horse::new("Comet", date(2018, 5, 5), Sex::Male).with_owner(owner);
        backend.create_horse(&owned).await.unwrap();

        let female = HorseSearch {
            sex: Some(Sex::Female),
            ..HorseSearch::default()
        };
        let found = backend.search_horses(&female).await.unwrap();
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|h| h.sex == Sex::Female));

        let all = backend.search_horses(&female.without_sex()).await.unwrap();
        assert_eq!(all.len(), 6);

        let by_owner = HorseSearch {
            owner_name: Some("ada by".to_string()),
            ..HorseSearch::default()
        };
        let found = backend.search_horses(&by_owner).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].owner_name(), "Ada Byron");

        let born_before = HorseSearch {
            born_before: Some(date(2008, 1, 1)),
            ..HorseSearch::default()
        };
        assert_eq!(backend.search_horses(&born_before).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_suggestions_filter_sex_and_limit() {
        let backend = MemoryBackend::new();
        pedigree(&backend).await;

        let query = HorseSuggestionQuery {
            name: "a".to_string(),
            sex: Sex::Male,
            limit: 1,
        };
        let found = backend.suggest_horses(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sex, Sex::Male);
    }

    #[tokio::test]
    async fn test_delete_clears_parent_references() {
        let backend = MemoryBackend::new();
        pedigree(&backend).await;

        backend.delete_horse(3).await.unwrap();

        let ids: Vec<_> = backend
            .list_horses()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|h| h.id)
            .collect();
        assert!(!ids.contains(&3));
        assert!(backend.get_horse(5).await.unwrap().mother.is_none());
        assert!(backend.delete_horse(3).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_parent_rules_are_conflicts() {
        let backend = MemoryBackend::new();
        let horses = pedigree(&backend).await;

        let mut foal = Horse::new("Odd", date(2020, 1, 1), Sex::Male);
        foal.mother = Some(Box::new(horses[3].clone()));
        let err = backend.create_horse(&foal).await.unwrap_err();
        assert_eq!(err.status(), Some(CONFLICT));
        assert!(err.user_message().contains("Mother has to be female"));

        // Mare is a mother and cannot become male.
        let mut mare = horses[2].clone();
        mare.sex = Sex::Male;
        let err = backend.update_horse(3, &mare).await.unwrap_err();
        assert!(err.user_message().contains("Cannot change sex"));
    }

    #[tokio::test]
    async fn test_blank_fields_are_unprocessable() {
        let backend = MemoryBackend::new();
        let horse = Horse::new("", date(2020, 1, 1), Sex::Male).with_description(" ");
        let err = backend.create_horse(&horse).await.unwrap_err();
        assert_eq!(err.status(), Some(UNPROCESSABLE));
        match err {
            ApiError::Backend { errors, .. } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_owner_email_rules() {
        let backend = MemoryBackend::new();
        backend
            .create_owner(&Owner::new("Ada", "Byron").with_email("ada@example.org"))
            .await
            .unwrap();

        let dup = Owner::new("Eve", "Byron").with_email("ada@example.org");
        assert!(backend.create_owner(&dup).await.is_err());

        let bad = Owner::new("Eve", "Byron").with_email("not-an-email");
        assert!(backend.create_owner(&bad).await.is_err());

        let found = backend.search_owners("byr", 5).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(backend.list_owners().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let backend = MemoryBackend::new();
        backend.list_horses().await.unwrap();
        backend.list_owners().await.unwrap();
        assert_eq!(backend.requests(), vec!["GET /horses", "GET /owners"]);

        backend.clear_requests();
        assert_eq!(backend.request_count(), 0);
    }
}
