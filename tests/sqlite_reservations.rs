//! Reservation lifecycle against SQLite through SeaORM

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, NotSet, Set};
use sea_orm_migration::MigratorTrait;

use rental_core::application::{ListingService, ReservationService};
use rental_core::domain::query::PageLimits;
use rental_core::domain::PricingPolicy;
use rental_core::infrastructure::database::entities::{holder, resource, resource_group};
use rental_core::infrastructure::database::migrator::Migrator;
use rental_core::shared::{CallContext, DomainError, ErrorKind};
use rental_core::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

struct Seeded {
    db: DatabaseConnection,
    holder_id: i32,
    resource_id: i32,
    other_resource_id: i32,
}

async fn seeded() -> Seeded {
    seeded_with(&DatabaseConfig::sqlite_in_memory()).await
}

async fn seeded_with(config: &DatabaseConfig) -> Seeded {
    let db = init_database(config).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let now = Utc::now();

    let holder = holder::ActiveModel {
        id: NotSet,
        username: Set("alice".into()),
        email: Set("alice@example.com".into()),
        created_at: Set(now),
    }
    .insert(&db)
    .await
    .unwrap();

    let group = resource_group::ActiveModel {
        id: NotSet,
        name: Set("Acme Rentals".into()),
        email: Set("desk@acme.example".into()),
        phone: Set("555-0100".into()),
        address: Set("1 Main St".into()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .unwrap();

    let mut ids = Vec::new();
    for (make, registration_no) in [("Toyota", "AB-123"), ("Honda", "CD-456")] {
        let row = resource::ActiveModel {
            id: NotSet,
            group_id: Set(group.id),
            make: Set(make.into()),
            model: Set("Compact".into()),
            year: Set(2022),
            color: Set("blue".into()),
            registration_no: Set(registration_no.into()),
            daily_rate: Set(Decimal::from(100)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&db)
        .await
        .unwrap();
        ids.push(row.id);
    }

    Seeded {
        db,
        holder_id: holder.id,
        resource_id: ids[0],
        other_resource_id: ids[1],
    }
}

fn services(db: &DatabaseConnection) -> (ReservationService, ListingService) {
    let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    (
        ReservationService::new(repos.clone(), PricingPolicy::default()),
        ListingService::new(repos, PageLimits::default()),
    )
}

#[tokio::test]
async fn create_update_and_delete() {
    let s = seeded().await;
    let (reservations, _) = services(&s.db);
    let ctx = CallContext::background();

    let created = reservations
        .create(&ctx, s.holder_id, s.resource_id, "2025-01-01", "2025-01-04")
        .await
        .unwrap();
    assert_eq!(created.total, Decimal::from(300));

    let fetched = reservations.get_by_id(&ctx, created.id).await.unwrap();
    assert_eq!(fetched.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

    let updated = reservations
        .update(&ctx, created.id, "2025-01-01", "2025-01-10")
        .await
        .unwrap();
    assert_eq!(updated.total, Decimal::from(900));
    assert_eq!(updated.end_date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());

    reservations.delete(&ctx, created.id).await.unwrap();
    let err = reservations.delete(&ctx, created.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn overlapping_bookings_are_refused() {
    let s = seeded().await;
    let (reservations, _) = services(&s.db);
    let ctx = CallContext::background();

    reservations
        .create(&ctx, s.holder_id, s.resource_id, "2025-03-01", "2025-03-05")
        .await
        .unwrap();

    let err = reservations
        .create(&ctx, s.holder_id, s.resource_id, "2025-03-05", "2025-03-08")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BadRequest(_)));

    // same dates on another resource are fine
    reservations
        .create(&ctx, s.holder_id, s.other_resource_id, "2025-03-05", "2025-03-08")
        .await
        .unwrap();

    let later = reservations
        .create(&ctx, s.holder_id, s.resource_id, "2025-03-06", "2025-03-07")
        .await
        .unwrap();
    let err = reservations
        .update(&ctx, later.id, "2025-03-04", "2025-03-07")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BadRequest(_)));

    assert_eq!(reservations.get_by_holder(&ctx, s.holder_id).await.unwrap().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_overlapping_creates_admit_one() {
    let s = seeded().await;
    let (reservations, _) = services(&s.db);
    let reservations = Arc::new(reservations);

    let mut handles = Vec::new();
    for _ in 0..4 {
        let reservations = Arc::clone(&reservations);
        let (holder_id, resource_id) = (s.holder_id, s.resource_id);
        handles.push(tokio::spawn(async move {
            let ctx = CallContext::background();
            reservations
                .create(&ctx, holder_id, resource_id, "2025-05-01", "2025-05-03")
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creates_on_a_pooled_file_report_conflicts() {
    let path = std::env::temp_dir().join(format!("rental-{}.db", uuid::Uuid::new_v4()));
    let config = DatabaseConfig {
        max_connections: 8,
        ..DatabaseConfig::sqlite(&path.to_string_lossy())
    };
    let s = seeded_with(&config).await;
    let (reservations, _) = services(&s.db);
    let reservations = Arc::new(reservations);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let reservations = Arc::clone(&reservations);
        let (holder_id, resource_id) = (s.holder_id, s.resource_id);
        handles.push(tokio::spawn(async move {
            let ctx = CallContext::background();
            reservations
                .create(&ctx, holder_id, resource_id, "2025-08-01", "2025-08-03")
                .await
        }));
    }

    let mut created = 0;
    let mut rejected = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(e) => rejected.push(e.kind()),
        }
    }

    s.db.close().await.unwrap();
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, vec![ErrorKind::BadRequest; 7]);
}

#[tokio::test]
async fn listings_filter_sort_and_page() {
    let s = seeded().await;
    let (reservations, listing) = services(&s.db);
    let ctx = CallContext::background();

    for (start, end) in [("2025-01-01", "2025-01-02"), ("2025-02-01", "2025-02-03"), ("2025-03-01", "2025-03-02")] {
        reservations
            .create(&ctx, s.holder_id, s.resource_id, start, end)
            .await
            .unwrap();
    }

    let page = listing
        .reservations(&ctx, &[("start_date[gte]", "2025-01-15"), ("sort", "start_date-desc")])
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].start_date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

    let page = listing
        .reservations(&ctx, &[("page", "2"), ("page_size", "2")])
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_pages, 2);

    let groups = listing.groups(&ctx, &[("name[sw]", "Acme")]).await.unwrap();
    assert_eq!(groups.total, 1);
    let groups = listing.groups(&ctx, &[("name[sw]", "_")]).await.unwrap();
    assert_eq!(groups.total, 0);
    let groups = listing.groups(&ctx, &[("name[ct]", "%")]).await.unwrap();
    assert_eq!(groups.total, 0);

    let resources = listing
        .resources(&ctx, &[("registration_no", "CD-456")])
        .await
        .unwrap();
    assert_eq!(resources.items.len(), 1);
    assert_eq!(resources.items[0].make, "Honda");
    let err = listing
        .resources(&ctx, &[("registration_no[sw]", "CD")])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadQueryParameter);

    let err = listing
        .resources(&ctx, &[("sort", "make; DROP TABLE resources-asc")])
        .await
        .unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn current_and_availability() {
    let s = seeded().await;
    let (reservations, _) = services(&s.db);
    let ctx = CallContext::background();

    reservations
        .create(&ctx, s.holder_id, s.resource_id, "2025-06-01", "2025-06-05")
        .await
        .unwrap();

    let day = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
    assert_eq!(reservations.current(&ctx, day).await.unwrap().len(), 1);
    let day = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
    assert!(reservations.current(&ctx, day).await.unwrap().is_empty());

    assert!(!reservations
        .check_availability(&ctx, s.resource_id, "2025-06-05", "2025-06-07")
        .await
        .unwrap());
    assert!(reservations
        .check_availability(&ctx, s.resource_id, "2025-06-06", "2025-06-07")
        .await
        .unwrap());
}
