//! Filtered listings of resources, groups and reservations
//!
//! Raw query pairs go through the predicate parser and the plan builder
//! against the entity's column allow-list; the resulting plan is handed to
//! the store unchanged.

use std::sync::Arc;

use tracing::debug;

use crate::domain::group::GROUP_SCHEMA;
use crate::domain::query::{EntitySchema, PageLimits, QueryPlan};
use crate::domain::reservation::RESERVATION_SCHEMA;
use crate::domain::resource::RESOURCE_SCHEMA;
use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, Reservation, Resource, ResourceGroup,
};
use crate::shared::{CallContext, PaginatedResult};

pub struct ListingService {
    repos: Arc<dyn RepositoryProvider>,
    limits: PageLimits,
}

impl ListingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, limits: PageLimits) -> Self {
        Self { repos, limits }
    }

    fn plan<K, V>(&self, schema: &'static EntitySchema, pairs: &[(K, V)]) -> DomainResult<QueryPlan>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let plan = QueryPlan::from_query(schema, pairs, self.limits)?;
        debug!(
            entity = schema.entity,
            filters = plan.clauses().len(),
            sort = plan.sort_field(),
            page = plan.page(),
            limit = plan.limit(),
            "Listing plan built"
        );
        Ok(plan)
    }

    pub async fn resources<K, V>(
        &self,
        ctx: &CallContext,
        pairs: &[(K, V)],
    ) -> DomainResult<PaginatedResult<Resource>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let plan = self.plan(&RESOURCE_SCHEMA, pairs)?;
        ctx.run("list_resources", self.repos.resources().list(&plan)).await
    }

    pub async fn resource(&self, ctx: &CallContext, id: i32) -> DomainResult<Resource> {
        ctx.run("find_resource", self.repos.resources().find_by_id(id))
            .await?
            .ok_or_else(|| DomainError::not_found("Resource", id))
    }

    pub async fn groups<K, V>(
        &self,
        ctx: &CallContext,
        pairs: &[(K, V)],
    ) -> DomainResult<PaginatedResult<ResourceGroup>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let plan = self.plan(&GROUP_SCHEMA, pairs)?;
        ctx.run("list_groups", self.repos.groups().list(&plan)).await
    }

    pub async fn group(&self, ctx: &CallContext, id: i32) -> DomainResult<ResourceGroup> {
        ctx.run("find_group", self.repos.groups().find_by_id(id))
            .await?
            .ok_or_else(|| DomainError::not_found("Group", id))
    }

    pub async fn reservations<K, V>(
        &self,
        ctx: &CallContext,
        pairs: &[(K, V)],
    ) -> DomainResult<PaginatedResult<Reservation>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let plan = self.plan(&RESERVATION_SCHEMA, pairs)?;
        ctx.run("list_reservations", self.repos.reservations().list(&plan)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::application::ReservationService;
    use crate::domain::{Holder, PricingPolicy};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use crate::shared::ErrorKind;

    fn seeded() -> ListingService {
        ListingService::new(seeded_repos(), PageLimits::default())
    }

    fn seeded_repos() -> Arc<InMemoryRepositoryProvider> {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let base = Utc::now();
        for (i, (name, email)) in [
            ("Acme Rentals", "desk@acme.test"),
            ("Acme Trucks", "trucks@corp.test"),
            ("Budget Wheels", "hi@budget.test"),
        ]
        .into_iter()
        .enumerate()
        {
            let at = base + Duration::seconds(i as i64);
            repos.add_group(ResourceGroup {
                id: 0,
                name: name.into(),
                email: email.into(),
                phone: String::new(),
                address: String::new(),
                created_at: at,
                updated_at: at,
            });
        }
        for (i, (make, year, rate)) in [("VW", 2012, 40), ("VW", 2019, 65), ("Fiat", 2021, 55)]
            .into_iter()
            .enumerate()
        {
            let at = base + Duration::seconds(i as i64);
            repos.add_resource(Resource {
                id: 0,
                group_id: 1,
                make: make.into(),
                model: "Base".into(),
                year,
                color: "white".into(),
                registration_no: format!("REG-{i}"),
                daily_rate: Decimal::from(rate),
                created_at: at,
                updated_at: at,
            });
        }
        repos
    }

    #[tokio::test]
    async fn groups_by_name_prefix_and_email_fragment() {
        let listing = seeded();
        let ctx = CallContext::background();

        let page = listing.groups(&ctx, &[("name[sw]", "Acme")]).await.unwrap();
        assert_eq!(page.total, 2);

        let page = listing.groups(&ctx, &[("email[ct]", "corp")]).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Acme Trucks");
    }

    #[tokio::test]
    async fn resources_typed_filters_and_sort() {
        let listing = seeded();
        let ctx = CallContext::background();

        let page = listing
            .resources(&ctx, &[("year[gt]", "2015"), ("sort", "daily_rate-desc")])
            .await
            .unwrap();
        let rates: Vec<Decimal> = page.items.iter().map(|r| r.daily_rate).collect();
        assert_eq!(rates, vec![Decimal::from(65), Decimal::from(55)]);

        let page = listing.resources(&ctx, &[("make", "vw")]).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn default_paging() {
        let listing = seeded();
        let page = listing
            .resources(&CallContext::background(), &[] as &[(&str, &str)])
            .await
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].make, "VW");
    }

    #[tokio::test]
    async fn reservations_filter_sort_and_page() {
        let repos = seeded_repos();
        let holder = repos.add_holder(Holder {
            id: 0,
            username: "bob".into(),
            email: "bob@example.com".into(),
            created_at: Utc::now(),
        });
        let booking = ReservationService::new(repos.clone(), PricingPolicy::default());
        let listing = ListingService::new(repos, PageLimits::default());
        let ctx = CallContext::background();
        for (start, end) in [
            ("2025-05-01", "2025-05-02"),
            ("2025-05-04", "2025-05-05"),
            ("2025-05-07", "2025-05-08"),
        ] {
            booking.create(&ctx, holder.id, 1, start, end).await.unwrap();
        }

        let page = listing
            .reservations(&ctx, &[("start_date[gte]", "2025-05-04"), ("page_size", "1"), ("page", "2")])
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].start_date.to_string(), "2025-05-07");

        let err = listing.reservations(&ctx, &[("total[ct]", "1")]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadQueryParameter);

        let err = listing
            .reservations(&ctx, &[("sort", "id; DROP TABLE reservations-asc")])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn bad_parameters() {
        let listing = seeded();
        let ctx = CallContext::background();

        let err = listing.groups(&ctx, &[("name[zz]", "x")]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadQueryParameter);

        let err = listing.resources(&ctx, &[("year", "recent")]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadQueryParameter);

        let err = listing.resources(&ctx, &[("page", "0")]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        let err = listing.resource(&ctx, 99).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
