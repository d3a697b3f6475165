use std::future::Future;

use model::{Horse, HorseFamilyTree, HorseId, HorseSearch, HorseSuggestionQuery, Owner};

use crate::error::ApiResult;

/// The remote collaborator: one method per backend endpoint.
///
/// Implementations perform exactly one request per call. Client-side
/// concerns (validation, short-circuits, defaults) live in [`crate::Client`].
pub trait Backend {
    /// `GET /horses`
    fn list_horses(&self) -> impl Future<Output = ApiResult<Vec<Horse>>>;
    /// `GET /horses?name=&description=&bornBefore=&sex=&ownerName=`
    fn search_horses(&self, search: &HorseSearch) -> impl Future<Output = ApiResult<Vec<Horse>>>;
    /// `GET /horses?name=&sex=&limit=`
    fn suggest_horses(
        &self,
        query: &HorseSuggestionQuery,
    ) -> impl Future<Output = ApiResult<Vec<Horse>>>;
    /// `GET /horses/{id}`
    fn get_horse(&self, id: HorseId) -> impl Future<Output = ApiResult<Horse>>;
    /// `POST /horses`
    fn create_horse(&self, horse: &Horse) -> impl Future<Output = ApiResult<Horse>>;
    /// `PUT /horses/{id}`
    fn update_horse(&self, id: HorseId, horse: &Horse) -> impl Future<Output = ApiResult<Horse>>;
    /// `DELETE /horses/{id}`
    fn delete_horse(&self, id: HorseId) -> impl Future<Output = ApiResult<()>>;
    /// `GET /horses/{id}/familytree?generations=`
    fn family_tree(
        &self,
        id: HorseId,
        generations: u32,
    ) -> impl Future<Output = ApiResult<Vec<HorseFamilyTree>>>;
    /// `GET /owners`
    fn list_owners(&self) -> impl Future<Output = ApiResult<Vec<Owner>>>;
    /// `GET /owners?name=&maxAmount=`
    fn search_owners(
        &self,
        name: &str,
        max_amount: usize,
    ) -> impl Future<Output = ApiResult<Vec<Owner>>>;
    /// `POST /owners`
    fn create_owner(&self, owner: &Owner) -> impl Future<Output = ApiResult<Owner>>;
}
