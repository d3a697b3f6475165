//! # Client: what the views call
//!
//! [`Client`] wraps a [`Backend`] with the client-side rules that sit in
//! front of every request:
//!
//! | Rule | Methods |
//! |------|---------|
//! | Form validation runs first; an invalid form sends nothing | [`save_horse`](Client::save_horse), [`save_owner`](Client::save_owner) |
//! | Blank description / email are omitted, never sent as `""` | [`create_horse`](Client::create_horse), [`update_horse`](Client::update_horse), [`create_owner`](Client::create_owner) |
//! | Empty autocomplete input yields no suggestions and no request | [`mother_suggestions`](Client::mother_suggestions), [`father_suggestions`](Client::father_suggestions), [`owner_suggestions`](Client::owner_suggestions) |
//! | Family trees are requested with a positive [`GenerationLimit`] and returned indexed | [`family_tree`](Client::family_tree) |
//!
//! Nothing is cached and nothing is retried; each call is one request.

use model::{
    ClientConfig, FamilyTree, FormMode, GenerationLimit, Horse, HorseForm, HorseId, HorseSearch,
    HorseSuggestionQuery, Owner, OwnerForm, Sex,
};

use crate::backend::Backend;
use crate::error::ApiResult;

#[derive(Clone, Debug)]
pub struct Client<B> {
    backend: B,
    config: ClientConfig,
}

impl<B: Backend> Client<B> {
    pub fn new(backend: B, config: ClientConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn list_horses(&self) -> ApiResult<Vec<Horse>> {
        self.backend.list_horses().await
    }

    pub async fn search_horses(&self, search: &HorseSearch) -> ApiResult<Vec<Horse>> {
        self.backend.search_horses(search).await
    }

    pub async fn get_horse(&self, id: HorseId) -> ApiResult<Horse> {
        self.backend.get_horse(id).await
    }

    pub async fn create_horse(&self, horse: Horse) -> ApiResult<Horse> {
        let horse = Horse {
            id: None,
            ..horse.without_blank_description()
        };
        let created = self.backend.create_horse(&horse).await?;
        tracing::info!("Created horse {:?} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update_horse(&self, id: HorseId, horse: Horse) -> ApiResult<Horse> {
        let horse = Horse {
            id: Some(id),
            ..horse.without_blank_description()
        };
        let updated = self.backend.update_horse(id, &horse).await?;
        tracing::info!("Updated horse {} ({})", id, updated.name);
        Ok(updated)
    }

    /// Validate the form, then create or update depending on `mode`.
    pub async fn save_horse(&self, mode: FormMode, form: &HorseForm) -> ApiResult<Horse> {
        let horse = form.validate()?;
        match mode {
            FormMode::Create => self.create_horse(horse).await,
            FormMode::Edit(id) => self.update_horse(id, horse).await,
        }
    }

    pub async fn delete_horse(&self, id: HorseId) -> ApiResult<()> {
        self.backend.delete_horse(id).await?;
        tracing::info!("Deleted horse {}", id);
        Ok(())
    }

    pub async fn mother_suggestions(&self, input: &str) -> ApiResult<Vec<Horse>> {
        self.horse_suggestions(input, Sex::Female).await
    }

    pub async fn father_suggestions(&self, input: &str) -> ApiResult<Vec<Horse>> {
        self.horse_suggestions(input, Sex::Male).await
    }

    /// Horses of the given sex whose name matches `input`.
    pub async fn horse_suggestions(&self, input: &str, sex: Sex) -> ApiResult<Vec<Horse>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let query = HorseSuggestionQuery {
            name: input.to_string(),
            sex,
            limit: self.config.search.suggestion_limit,
        };
        self.backend.suggest_horses(&query).await
    }

    pub async fn owner_suggestions(&self, input: &str) -> ApiResult<Vec<Owner>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        self.search_owners(input, self.config.search.suggestion_limit)
            .await
    }

    pub async fn search_owners(&self, name: &str, max_amount: usize) -> ApiResult<Vec<Owner>> {
        self.backend.search_owners(name, max_amount).await
    }

    pub async fn family_tree(&self, id: HorseId, limit: GenerationLimit) -> ApiResult<FamilyTree> {
        let nodes = self.backend.family_tree(id, limit.get()).await?;
        tracing::debug!("Family tree of {} has {} nodes", id, nodes.len());
        Ok(FamilyTree::new(nodes))
    }

    /// Parse the `generations` query value using the configured default.
    pub fn generation_limit(&self, query: Option<&str>) -> GenerationLimit {
        GenerationLimit::from_query(query, self.config.family_tree.default_generations)
    }

    pub async fn list_owners(&self) -> ApiResult<Vec<Owner>> {
        self.backend.list_owners().await
    }

    pub async fn create_owner(&self, owner: Owner) -> ApiResult<Owner> {
        let owner = Owner {
            id: None,
            ..owner.without_blank_email()
        };
        let created = self.backend.create_owner(&owner).await?;
        tracing::info!("Created owner {:?} ({})", created.id, created.full_name());
        Ok(created)
    }

    /// Validate the form, then create the owner.
    pub async fn save_owner(&self, form: &OwnerForm) -> ApiResult<Owner> {
        let owner = form.validate()?;
        self.create_owner(owner).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::memory::MemoryBackend;
    use chrono::NaiveDate;

    fn client() -> Client<MemoryBackend> {
        Client::new(MemoryBackend::new(), ClientConfig::default())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn thunder_form() -> HorseForm {
        HorseForm {
            name: "Thunder".to_string(),
            date_of_birth: "2020-01-01".to_string(),
            sex: Sex::Male,
            ..HorseForm::default()
        }
    }

    #[tokio::test]
    async fn test_create_without_description() {
        let client = client();

        let created = client
            .save_horse(FormMode::Create, &thunder_form())
            .await
            .unwrap();

        assert!(created.id.is_some());
        assert!(created.description.is_none());
        assert_eq!(created.name, "Thunder");
        assert_eq!(client.backend().requests(), vec!["POST /horses"]);
    }

    #[tokio::test]
    async fn test_blank_description_is_never_sent() {
        let client = client();
        let horse = Horse::new("Breeze", date(2019, 4, 4), Sex::Female).with_description("");

        let created = client.create_horse(horse).await.unwrap();
        assert!(created.description.is_none());

        let id = created.id.unwrap();
        let updated = client
            .update_horse(id, created.with_description("  "))
            .await
            .unwrap();
        assert!(updated.description.is_none());
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let client = client();
        let mut form = thunder_form();
        form.name = String::new();

        let err = client.save_horse(FormMode::Create, &form).await.unwrap_err();

        assert!(matches!(err, ApiError::Invalid(_)));
        assert_eq!(client.backend().request_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_mode_updates_existing_horse() {
        let client = client();
        let created = client
            .save_horse(FormMode::Create, &thunder_form())
            .await
            .unwrap();
        let id = created.id.unwrap();

        let mut form = HorseForm::from_horse(&created);
        form.description = "Very fast".to_string();
        let updated = client.save_horse(FormMode::Edit(id), &form).await.unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.description.as_deref(), Some("Very fast"));
        assert_eq!(client.list_horses().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_autocomplete_issues_no_request() {
        let client = client();

        assert!(client.mother_suggestions("").await.unwrap().is_empty());
        assert!(client.father_suggestions("").await.unwrap().is_empty());
        assert!(client.owner_suggestions("").await.unwrap().is_empty());
        assert_eq!(client.backend().request_count(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_autocomplete_still_queries_backend() {
        let client = client();

        client.mother_suggestions("  ").await.unwrap();
        assert_eq!(client.backend().request_count(), 1);

        client.owner_suggestions(" ").await.unwrap();
        assert_eq!(client.backend().request_count(), 2);
    }

    #[tokio::test]
    async fn test_autocomplete_issues_one_scoped_request() {
        let client = client();
        for (name, sex) in [("Bella", Sex::Female), ("Bruno", Sex::Male), ("Belle", Sex::Female)] {
            client
                .create_horse(Horse::new(name, date(2010, 1, 1), sex))
                .await
                .unwrap();
        }
        client.backend().clear_requests();

        let mothers = client.mother_suggestions("b").await.unwrap();
        assert_eq!(mothers.len(), 2);
        assert!(mothers.iter().all(|h| h.sex == Sex::Female));
        assert_eq!(
            client.backend().requests(),
            vec!["GET /horses?name=b&sex=FEMALE&limit=5"]
        );

        client.backend().clear_requests();
        let fathers = client.father_suggestions("b").await.unwrap();
        assert_eq!(fathers.len(), 1);
        assert_eq!(client.backend().request_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_reload() {
        let client = client();
        let a = client
            .create_horse(Horse::new("A", date(2010, 1, 1), Sex::Female))
            .await
            .unwrap();
        client
            .create_horse(Horse::new("B", date(2011, 1, 1), Sex::Male))
            .await
            .unwrap();

        client.delete_horse(a.id.unwrap()).await.unwrap();

        let horses = client.list_horses().await.unwrap();
        assert_eq!(horses.len(), 1);
        assert!(horses.iter().all(|h| h.id != a.id));
    }

    #[tokio::test]
    async fn test_clearing_sex_filter() {
        let client = client();
        client
            .create_horse(Horse::new("Mare", date(2010, 1, 1), Sex::Female))
            .await
            .unwrap();
        client
            .create_horse(Horse::new("Colt", date(2012, 1, 1), Sex::Male))
            .await
            .unwrap();

        let search = HorseSearch::from_input("", "", "", "FEMALE", "");
        let female = client.search_horses(&search).await.unwrap();
        assert_eq!(female.len(), 1);
        assert_eq!(female[0].sex, Sex::Female);

        let all = client.search_horses(&search.without_sex()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_family_tree_two_generations() {
        let client = client();
        let mother = client
            .create_horse(Horse::new("Mother", date(2005, 1, 1), Sex::Female))
            .await
            .unwrap();
        let father = client
            .create_horse(Horse::new("Father", date(2005, 1, 1), Sex::Male))
            .await
            .unwrap();
        let grandfather = client
            .create_horse(Horse::new("Grandfather", date(1999, 1, 1), Sex::Male))
            .await
            .unwrap();
        let mother = client
            .update_horse(mother.id.unwrap(), mother.with_father(grandfather.clone()))
            .await
            .unwrap();
        let root = client
            .create_horse(
                Horse::new("Root", date(2015, 1, 1), Sex::Female)
                    .with_mother(mother.clone())
                    .with_father(father.clone()),
            )
            .await
            .unwrap();
        let root_id = root.id.unwrap();

        let tree = client
            .family_tree(root_id, client.generation_limit(Some("2")))
            .await
            .unwrap();
        let ancestry = tree.ancestry(root_id).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(ancestry.ids(), vec![root_id, mother.id.unwrap(), father.id.unwrap()]);
        assert!(tree.get(grandfather.id.unwrap()).is_none());

        let tree = client
            .family_tree(root_id, client.generation_limit(None))
            .await
            .unwrap();
        assert_eq!(tree.ancestry(root_id).unwrap().depth(), 3);
        assert_eq!(
            client.backend().requests().last().map(String::as_str),
            Some(format!("GET /horses/{root_id}/familytree?generations=5").as_str())
        );
    }

    #[tokio::test]
    async fn test_owner_form_omits_blank_email() {
        let client = client();
        let form = OwnerForm {
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            email: " ".to_string(),
        };
        let owner = client.save_owner(&form).await.unwrap();
        assert!(owner.email.is_none());
        assert_eq!(client.list_owners().await.unwrap(), vec![owner.clone()]);

        let found = client.owner_suggestions("ada").await.unwrap();
        assert_eq!(found, vec![owner]);
    }

    #[tokio::test]
    async fn test_invalid_owner_form_sends_nothing() {
        let client = client();
        let err = client.save_owner(&OwnerForm::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
        assert_eq!(client.backend().request_count(), 0);
    }
}
