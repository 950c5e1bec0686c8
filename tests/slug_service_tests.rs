use std::sync::Arc;

use slug_ledger::application::commands::slugs::{
    AttachSlugCommand, RescopeSlugCommand, SlugCommandService,
};
use slug_ledger::application::error::ApplicationError;
use slug_ledger::application::queries::slugs::{
    LookupSlugQuery, SlugHistoryQuery, SlugQueryService,
};
use slug_ledger::domain::errors::DomainError;
use slug_ledger::domain::slug::SlugId;

mod support;
use support::{Fixture, article, fixed_now};

fn services(fx: &Fixture) -> (SlugCommandService, SlugQueryService) {
    (
        SlugCommandService::new(Arc::clone(&fx.manager)),
        SlugQueryService::new(Arc::clone(&fx.manager)),
    )
}

fn attach(sluggable_id: i64, name: &str) -> AttachSlugCommand {
    AttachSlugCommand::builder()
        .owner("Article", sluggable_id)
        .name(name)
        .build()
        .unwrap()
}

#[test]
fn attach_builder_requires_owner_and_name() {
    assert!(AttachSlugCommand::builder().name("x").build().is_err());
    assert!(AttachSlugCommand::builder().owner("Article", 1).build().is_err());

    let command = AttachSlugCommand::builder()
        .owner("Article", 1)
        .name("x")
        .scope("tenant")
        .build()
        .unwrap();
    assert_eq!(command.scope.as_deref(), Some("tenant"));
}

#[tokio::test]
async fn attach_returns_friendly_identifier() {
    let fx = Fixture::new();
    fx.registry.register(article(1)).await;
    fx.registry.register(article(2)).await;
    let (commands, _) = services(&fx);

    let first = commands.attach_slug(attach(1, "intro")).await.unwrap();
    let second = commands.attach_slug(attach(2, "intro")).await.unwrap();

    assert_eq!(first.friendly_id, "intro");
    assert_eq!(second.friendly_id, "intro--2");
    assert_eq!(second.sequence, 2);
    assert_eq!(second.sluggable_id, Some(2));
    assert_eq!(second.created_at, Some(fixed_now()));
}

#[tokio::test]
async fn attach_surfaces_blank_name_and_bad_owner_ids() {
    let fx = Fixture::new();
    let (commands, _) = services(&fx);

    let blank = commands.attach_slug(attach(1, "  ")).await.unwrap_err();
    assert!(matches!(
        blank,
        ApplicationError::Domain(DomainError::BlankName)
    ));

    let bad_owner = commands.attach_slug(attach(0, "intro")).await.unwrap_err();
    assert!(matches!(
        bad_owner,
        ApplicationError::Domain(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn lookup_of_outdated_identifier_points_to_canonical() {
    let fx = Fixture::new();
    let key = article(1);
    fx.rename(&key, "old-title").await;
    fx.rename(&key, "new-title").await;
    let (_, queries) = services(&fx);

    let found = queries
        .lookup(LookupSlugQuery {
            sluggable_type: "Article".into(),
            friendly_id: "old-title".into(),
            scope: None,
        })
        .await
        .unwrap();

    assert!(!found.current);
    assert_eq!(found.slug.name, "old-title");
    assert_eq!(found.canonical.as_deref(), Some("new-title"));
}

#[tokio::test]
async fn lookup_of_current_identifier_has_no_canonical() {
    let fx = Fixture::new();
    fx.rename(&article(1), "intro").await;
    fx.rename(&article(2), "intro").await;
    let (_, queries) = services(&fx);

    let found = queries
        .lookup(LookupSlugQuery {
            sluggable_type: "Article".into(),
            friendly_id: "intro--2".into(),
            scope: None,
        })
        .await
        .unwrap();

    assert!(found.current);
    assert!(found.canonical.is_none());
    assert_eq!(found.slug.friendly_id, "intro--2");

    let json = serde_json::to_value(&found).unwrap();
    assert_eq!(json["slug"]["sequence"], 2);
    assert!(json.get("canonical").is_none());
}

#[tokio::test]
async fn lookup_of_unknown_identifier_is_not_found() {
    let fx = Fixture::new();
    let (_, queries) = services(&fx);

    let err = queries
        .lookup(LookupSlugQuery {
            sluggable_type: "Article".into(),
            friendly_id: "missing".into(),
            scope: Some("tenant".into()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn history_lists_newest_first_with_friendly_ids() {
    let fx = Fixture::new();
    fx.rename(&article(2), "b").await;
    let key = article(1);
    fx.rename(&key, "a").await;
    fx.rename(&key, "b").await;
    let (_, queries) = services(&fx);

    let history = queries
        .history(SlugHistoryQuery {
            sluggable_type: "Article".into(),
            sluggable_id: 1,
        })
        .await
        .unwrap();

    let ids: Vec<&str> = history.iter().map(|dto| dto.friendly_id.as_str()).collect();
    assert_eq!(ids, vec!["b--2", "a"]);
}

#[tokio::test]
async fn rescope_moves_slug_and_keeps_its_id() {
    let fx = Fixture::new();
    let slug = fx.attach(&article(1), "intro").await;
    let (commands, _) = services(&fx);

    let moved = commands
        .rescope_slug(RescopeSlugCommand {
            id: slug.id().map(i64::from).unwrap(),
            scope: Some("tenant-b".into()),
        })
        .await
        .unwrap();

    assert_eq!(moved.id, slug.id().map(i64::from));
    assert_eq!(moved.scope.as_deref(), Some("tenant-b"));

    let missing = commands
        .rescope_slug(RescopeSlugCommand {
            id: i64::from(SlugId(999)),
            scope: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(missing, ApplicationError::NotFound(_)));
}
