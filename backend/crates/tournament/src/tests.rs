//! Unit tests for the tournament crate

#[cfg(test)]
mod domain_tests {
    use kernel::id::{EntrantId, EventId, MatchId};

    use crate::domain::entities::*;
    use crate::domain::value_objects::*;
    use crate::error::TournamentError;

    fn summary(id: i64, name: &str, date: Option<&str>, status: EventStatus) -> EventSummary {
        EventSummary {
            event: Event {
                id: EventId::new(id),
                name: EventName::new(name).unwrap(),
                date: date.map(str::to_string),
                rules: None,
                status,
            },
            entrant_count: 0,
        }
    }

    fn entrant(id: i64) -> Entrant {
        Entrant {
            id: EntrantId::new(id),
            event_id: EventId::new(1),
            name: EntrantName::new("Ryu").unwrap(),
            alias: EntrantAlias::parse(Some("The Wanderer")).unwrap(),
            dropped: false,
        }
    }

    fn pairing(e1: Option<i64>, e2: Option<i64>, winner: Option<i64>) -> Match {
        Match {
            id: MatchId::new(1),
            event_id: EventId::new(1),
            round: Some(1),
            entrant1_id: e1.map(EntrantId::new),
            entrant2_id: e2.map(EntrantId::new),
            scores: None,
            winner_id: winner.map(EntrantId::new),
        }
    }

    #[test]
    fn test_listing_order() {
        use EventStatus::*;
        let mut events = vec![
            summary(1, "Alpha", Some("2025-09-10"), Drafting),
            summary(2, "Beta", Some("2025-09-12"), Published),
            summary(3, "Gamma", Some("2025-09-12"), Completed),
            summary(4, "Delta", Some("2025-09-12"), Drafting),
            summary(5, "Zeta", Some("2025-09-12"), Drafting),
        ];
        events.sort_by(EventSummary::listing_order);

        let names: Vec<&str> = events.iter().map(|e| e.event.name.as_str()).collect();
        assert_eq!(names, ["Beta", "Delta", "Zeta", "Gamma", "Alpha"]);
    }

    #[test]
    fn test_listing_order_undated_last_then_id() {
        let mut events = vec![
            summary(3, "Same", None, EventStatus::Cancelled),
            summary(2, "Same", None, EventStatus::Cancelled),
            summary(1, "Dated", Some("2020-01-01"), EventStatus::Cancelled),
        ];
        events.sort_by(EventSummary::listing_order);

        let ids: Vec<i64> = events.iter().map(|e| e.event.id.get()).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn test_event_patch_leaves_absent_fields() {
        let mut event = summary(1, "Cup", Some("2025-01-01"), EventStatus::Drafting).event;
        event.apply(EventPatch {
            rules: Some(Some("Best of 3".into())),
            date: Some(None),
            ..Default::default()
        });
        assert_eq!(event.name.as_str(), "Cup");
        assert_eq!(event.date, None);
        assert_eq!(event.rules.as_deref(), Some("Best of 3"));
        assert_eq!(event.status, EventStatus::Drafting);
    }

    #[test]
    fn test_retire_unreferenced() {
        assert_eq!(entrant(7).retire(false), EntrantRemoval::Destroy);
    }

    #[test]
    fn test_retire_referenced() {
        let EntrantRemoval::Dropped(dropped) = entrant(7).retire(true) else {
            panic!("expected a soft delete");
        };
        assert_eq!(dropped.id, EntrantId::new(7));
        assert_eq!(dropped.event_id, EventId::new(1));
        assert_eq!(dropped.name.as_str(), "Dropped Entrant");
        assert_eq!(dropped.alias, None);
        assert!(dropped.dropped);
    }

    #[test]
    fn test_winner_must_be_an_entrant() {
        assert!(pairing(Some(1), Some(2), None).validate_winner().is_ok());
        assert!(pairing(Some(1), Some(2), Some(2)).validate_winner().is_ok());
        assert!(matches!(
            pairing(Some(1), Some(2), Some(3)).validate_winner(),
            Err(TournamentError::WinnerNotAnEntrant)
        ));
        assert!(pairing(None, Some(2), Some(1)).validate_winner().is_err());
    }

    #[test]
    fn test_same_entrants() {
        assert!(pairing(Some(4), Some(4), None).has_same_entrants());
        assert!(!pairing(Some(4), Some(5), None).has_same_entrants());
        assert!(!pairing(None, None, None).has_same_entrants());
    }

    #[test]
    fn test_match_patch_and_references() {
        let mut record = pairing(Some(1), Some(2), Some(1));
        record.apply(MatchPatch {
            winner_id: Some(None),
            scores: Some(Some("2-1".into())),
            ..Default::default()
        });
        assert_eq!(record.winner_id, None);
        assert_eq!(record.scores.as_deref(), Some("2-1"));
        assert!(record.references(EntrantId::new(2)));
        assert!(!record.references(EntrantId::new(3)));
    }
}

#[cfg(test)]
mod error_tests {
    use kernel::error::kind::ErrorKind;
    use kernel::serde_ext::InvalidInteger;

    use crate::error::TournamentError;

    #[test]
    fn test_kinds() {
        assert_eq!(TournamentError::MissingFields.kind(), ErrorKind::BadRequest);
        assert_eq!(TournamentError::SameEntrant.kind(), ErrorKind::BadRequest);
        assert_eq!(
            TournamentError::EntrantOutsideEvent.kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(TournamentError::EventNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            TournamentError::Internal("x".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_server_errors_are_generic() {
        let app = TournamentError::Internal("connection reset".into()).to_app_error();
        assert_eq!(app.message(), "Internal server error");
    }

    #[test]
    fn test_not_found_keeps_message() {
        let app = TournamentError::EntrantNotFound.to_app_error();
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.message(), "Entrant not found");
    }

    #[test]
    fn test_invalid_integer_message() {
        let err = TournamentError::from(InvalidInteger { field: "entrant1_id" });
        assert_eq!(err.to_string(), "Invalid integer for entrant1_id");
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use kernel::id::{EntrantId, EventId, MatchId};
    use kernel::serde_ext::LenientInt;

    use crate::application::*;
    use crate::domain::entities::EntrantRemoval;
    use crate::domain::value_objects::EventStatus;
    use crate::error::TournamentError;
    use crate::infra::memory::InMemoryTournamentRepository;

    struct Fixture {
        events: EventUseCase<InMemoryTournamentRepository>,
        entrants: EntrantUseCase<InMemoryTournamentRepository>,
        matches: MatchUseCase<InMemoryTournamentRepository>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryTournamentRepository::new());
        Fixture {
            events: EventUseCase::new(repo.clone()),
            entrants: EntrantUseCase::new(repo.clone()),
            matches: MatchUseCase::new(repo),
        }
    }

    fn num(n: i64) -> Option<LenientInt> {
        Some(LenientInt::Number(n))
    }

    fn text(s: &str) -> Option<LenientInt> {
        Some(LenientInt::Text(s.to_string()))
    }

    impl Fixture {
        async fn event(&self, name: &str) -> EventId {
            self.events
                .create(CreateEventInput {
                    name: Some(name.into()),
                    ..Default::default()
                })
                .await
                .unwrap()
                .event
                .id
        }

        async fn entrant(&self, event_id: EventId, name: &str) -> EntrantId {
            self.entrants
                .create(CreateEntrantInput {
                    name: Some(name.into()),
                    alias: Some("alias".into()),
                    event_id: num(event_id.get()),
                    dropped: None,
                })
                .await
                .unwrap()
                .id
        }

        async fn pairing(&self, event_id: EventId, a: EntrantId, b: EntrantId) -> MatchId {
            self.matches
                .create(CreateMatchInput {
                    event_id: num(event_id.get()),
                    entrant1_id: num(a.get()),
                    entrant2_id: num(b.get()),
                    ..Default::default()
                })
                .await
                .unwrap()
                .record
                .id
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_event_defaults() {
        let f = fixture();
        let created = f
            .events
            .create(CreateEventInput {
                name: Some("  Spring Cup ".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.event.status, EventStatus::Drafting);
        assert_eq!(created.event.name.as_str(), "Spring Cup");
        assert_eq!(created.entrant_count, 0);
    }

    #[tokio::test]
    async fn test_create_event_requires_name() {
        let f = fixture();
        let err = f.events.create(CreateEventInput::default()).await.unwrap_err();
        assert!(matches!(err, TournamentError::MissingFields));
    }

    #[tokio::test]
    async fn test_update_event_status_validated() {
        let f = fixture();
        let id = f.event("Cup").await;

        let err = f
            .events
            .update(
                id,
                UpdateEventInput {
                    status: Some(Some("Done".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid status: Done");

        let err = f
            .events
            .update(
                id,
                UpdateEventInput {
                    status: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::InvalidStatus(_)));

        let updated = f
            .events
            .update(
                id,
                UpdateEventInput {
                    status: Some(Some("published".into())),
                    rules: Some(Some("Bo5".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.event.status, EventStatus::Published);
        assert_eq!(updated.event.rules.as_deref(), Some("Bo5"));
        assert_eq!(updated.event.name.as_str(), "Cup");
    }

    #[tokio::test]
    async fn test_event_detail_resolves_names() {
        let f = fixture();
        let event = f.event("Cup").await;
        let a = f.entrant(event, "Ken").await;
        let b = f.entrant(event, "Ryu").await;
        f.matches
            .create(CreateMatchInput {
                event_id: num(event.get()),
                entrant1_id: num(a.get()),
                entrant2_id: num(b.get()),
                winner_id: num(b.get()),
                ..Default::default()
            })
            .await
            .unwrap();

        let detail = f.events.get(event).await.unwrap();
        assert_eq!(detail.summary.entrant_count, 2);
        assert_eq!(detail.entrants.len(), 2);
        let view = &detail.matches[0];
        assert_eq!(view.entrant1_name.as_deref(), Some("Ken"));
        assert_eq!(view.entrant2_name.as_deref(), Some("Ryu"));
        assert_eq!(view.winner_name.as_deref(), Some("Ryu"));
    }

    #[tokio::test]
    async fn test_delete_event_cascades() {
        let f = fixture();
        let event = f.event("Cup").await;
        let other = f.event("Other").await;
        let a = f.entrant(event, "A").await;
        let b = f.entrant(event, "B").await;
        let kept = f.entrant(other, "C").await;
        let m = f.pairing(event, a, b).await;

        f.events.delete(event).await.unwrap();

        assert!(matches!(
            f.events.get(event).await,
            Err(TournamentError::EventNotFound)
        ));
        assert!(matches!(
            f.entrants.get(a).await,
            Err(TournamentError::EntrantNotFound)
        ));
        assert!(matches!(
            f.matches.get(m).await,
            Err(TournamentError::MatchNotFound)
        ));
        assert!(f.entrants.get(kept).await.is_ok());
        assert!(matches!(
            f.events.delete(event).await,
            Err(TournamentError::EventNotFound)
        ));
    }

    // ------------------------------------------------------------------
    // Entrants
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_entrant_validation() {
        let f = fixture();
        let event = f.event("Cup").await;

        let err = f
            .entrants
            .create(CreateEntrantInput {
                name: Some("A".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::MissingFields));

        let err = f
            .entrants
            .create(CreateEntrantInput {
                name: Some("A".into()),
                event_id: num(999),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::EventNotFound));

        let created = f
            .entrants
            .create(CreateEntrantInput {
                name: Some("A".into()),
                alias: Some("   ".into()),
                event_id: text(&event.get().to_string()),
                dropped: None,
            })
            .await
            .unwrap();
        assert_eq!(created.event_id, event);
        assert_eq!(created.alias, None);
        assert!(!created.dropped);
    }

    #[tokio::test]
    async fn test_list_entrants_filter() {
        let f = fixture();
        let e1 = f.event("One").await;
        let e2 = f.event("Two").await;
        f.entrant(e1, "A").await;
        f.entrant(e2, "B").await;
        f.entrant(e1, "C").await;

        let names = |list: Vec<crate::domain::entities::Entrant>| {
            list.into_iter()
                .map(|e| e.name.as_str().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(f.entrants.list(Some(e1)).await.unwrap()), ["A", "C"]);
        assert_eq!(names(f.entrants.list(None).await.unwrap()), ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_update_entrant_allow_list() {
        let f = fixture();
        let event = f.event("Cup").await;
        let id = f.entrant(event, "A").await;

        let updated = f
            .entrants
            .update(
                id,
                UpdateEntrantInput {
                    name: Some(Some("Renamed".into())),
                    alias: Some(None),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_str(), "Renamed");
        assert_eq!(updated.alias, None);
        assert_eq!(updated.event_id, event);
    }

    #[tokio::test]
    async fn test_remove_unreferenced_entrant() {
        let f = fixture();
        let event = f.event("Cup").await;
        let id = f.entrant(event, "A").await;

        assert_eq!(f.entrants.remove(id).await.unwrap(), EntrantRemoval::Destroy);
        assert!(matches!(
            f.entrants.get(id).await,
            Err(TournamentError::EntrantNotFound)
        ));
        assert!(matches!(
            f.entrants.remove(id).await,
            Err(TournamentError::EntrantNotFound)
        ));
    }

    #[tokio::test]
    async fn test_remove_referenced_entrant() {
        let f = fixture();
        let event = f.event("Cup").await;
        let a = f.entrant(event, "A").await;
        let b = f.entrant(event, "B").await;
        let m = f.pairing(event, a, b).await;

        let EntrantRemoval::Dropped(dropped) = f.entrants.remove(a).await.unwrap() else {
            panic!("expected a soft delete");
        };
        assert!(dropped.dropped);
        assert_eq!(dropped.alias, None);

        let stored = f.entrants.get(a).await.unwrap();
        assert_eq!(stored.name.as_str(), "Dropped Entrant");

        let view = f.matches.get(m).await.unwrap();
        assert_eq!(view.record.entrant1_id, Some(a));
        assert_eq!(view.entrant1_name.as_deref(), Some("Dropped Entrant"));
    }

    // ------------------------------------------------------------------
    // Matches
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_match_required_fields() {
        let f = fixture();
        let event = f.event("Cup").await;
        let a = f.entrant(event, "A").await;

        let err = f
            .matches
            .create(CreateMatchInput {
                event_id: num(event.get()),
                entrant1_id: num(a.get()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::MissingFields));

        let err = f
            .matches
            .create(CreateMatchInput {
                event_id: num(event.get()),
                entrant1_id: text("abc"),
                entrant2_id: num(a.get()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid integer for entrant1_id");
    }

    #[tokio::test]
    async fn test_create_match_rules() {
        let f = fixture();
        let event = f.event("Cup").await;
        let a = f.entrant(event, "A").await;
        let b = f.entrant(event, "B").await;
        let c = f.entrant(event, "C").await;

        let err = f
            .matches
            .create(CreateMatchInput {
                event_id: num(event.get()),
                entrant1_id: num(a.get()),
                entrant2_id: num(b.get()),
                winner_id: num(c.get()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::WinnerNotAnEntrant));

        let err = f
            .matches
            .create(CreateMatchInput {
                event_id: num(event.get()),
                entrant1_id: num(a.get()),
                entrant2_id: text(&a.get().to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::SameEntrant));

        let err = f
            .matches
            .create(CreateMatchInput {
                event_id: num(event.get() + 100),
                entrant1_id: num(a.get()),
                entrant2_id: num(b.get()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::EventNotFound));

        let created = f
            .matches
            .create(CreateMatchInput {
                event_id: text(&event.get().to_string()),
                entrant1_id: num(a.get()),
                entrant2_id: num(b.get()),
                round: text("2"),
                winner_id: text(""),
                scores: Some("3-0".into()),
            })
            .await
            .unwrap();
        assert_eq!(created.record.round, Some(2));
        assert_eq!(created.record.winner_id, None);
        assert_eq!(created.winner_name, None);
    }

    #[tokio::test]
    async fn test_update_match_rechecks_rules() {
        let f = fixture();
        let event = f.event("Cup").await;
        let a = f.entrant(event, "A").await;
        let b = f.entrant(event, "B").await;
        let c = f.entrant(event, "C").await;
        let m = f.pairing(event, a, b).await;

        let err = f
            .matches
            .update(
                m,
                UpdateMatchInput {
                    winner_id: Some(num(c.get())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::WinnerNotAnEntrant));

        let err = f
            .matches
            .update(
                m,
                UpdateMatchInput {
                    entrant2_id: Some(num(a.get())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::SameEntrant));

        let updated = f
            .matches
            .update(
                m,
                UpdateMatchInput {
                    entrant2_id: Some(num(c.get())),
                    winner_id: Some(num(c.get())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.record.entrant2_id, Some(c));
        assert_eq!(updated.winner_name.as_deref(), Some("C"));

        let cleared = f
            .matches
            .update(
                m,
                UpdateMatchInput {
                    winner_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.record.winner_id, None);
    }

    #[tokio::test]
    async fn test_match_entrants_must_share_event() {
        let f = fixture();
        let cup = f.event("Cup").await;
        let open = f.event("Open").await;
        let a1 = f.entrant(cup, "A1").await;
        let a2 = f.entrant(cup, "A2").await;
        let b1 = f.entrant(open, "B1").await;
        let b2 = f.entrant(open, "B2").await;

        let err = f
            .matches
            .create(CreateMatchInput {
                event_id: num(open.get()),
                entrant1_id: num(a1.get()),
                entrant2_id: num(b1.get()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::EntrantOutsideEvent));
        assert_eq!(err.to_string(), "Entrants must belong to the match's event");

        let m = f.pairing(open, b1, b2).await;
        let err = f
            .matches
            .update(
                m,
                UpdateMatchInput {
                    entrant1_id: Some(num(a2.get())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TournamentError::EntrantOutsideEvent));

        // Removing the other event never touches this match's entrants
        f.events.delete(cup).await.unwrap();
        let kept = f.matches.get(m).await.unwrap();
        assert_eq!(kept.record.entrant1_id, Some(b1));
        assert_eq!(kept.entrant1_name.as_deref(), Some("B1"));
        assert!(f.entrants.get(b1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_match() {
        let f = fixture();
        let event = f.event("Cup").await;
        let a = f.entrant(event, "A").await;
        let b = f.entrant(event, "B").await;
        let m = f.pairing(event, a, b).await;

        f.matches.delete(m).await.unwrap();
        assert!(matches!(
            f.matches.delete(m).await,
            Err(TournamentError::MatchNotFound)
        ));
        assert!(f.matches.list(Some(event)).await.unwrap().is_empty());
    }

    // ------------------------------------------------------------------
    // Seeding
    // ------------------------------------------------------------------

    const SEED_FILE: &str = include_str!("../../../../database/seeds/tournament.json");

    #[tokio::test]
    async fn test_seed_file_loads() {
        let repo = Arc::new(InMemoryTournamentRepository::new());
        let seeder = SeedUseCase::new(repo.clone());
        let data = SeedData::from_json(SEED_FILE).unwrap();

        let report = seeder.load(&data).await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                events: 3,
                entrants: 8,
                matches: 5,
            }
        );

        let events = EventUseCase::new(repo.clone()).list().await.unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.event.name.as_str()).collect();
        assert_eq!(
            names,
            ["Autumn Open", "Weekly Locals #14", "Winter Invitational"]
        );
        assert_eq!(events[0].entrant_count, 4);

        let matches = MatchUseCase::new(repo).list(Some(events[0].event.id)).await.unwrap();
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].winner_name.as_deref(), Some("Ada Park"));
    }

    #[tokio::test]
    async fn test_seed_reset_then_reload() {
        let repo = Arc::new(InMemoryTournamentRepository::new());
        let seeder = SeedUseCase::new(repo.clone());
        let data = SeedData::from_json(SEED_FILE).unwrap();
        seeder.load(&data).await.unwrap();

        assert_eq!(seeder.reset().await.unwrap(), 3);
        let f = Fixture {
            events: EventUseCase::new(repo.clone()),
            entrants: EntrantUseCase::new(repo.clone()),
            matches: MatchUseCase::new(repo.clone()),
        };
        assert!(f.events.list().await.unwrap().is_empty());
        assert!(f.entrants.list(None).await.unwrap().is_empty());
        assert!(f.matches.list(None).await.unwrap().is_empty());

        // File labels are remapped onto fresh ids
        seeder.load(&data).await.unwrap();
        assert_eq!(f.events.list().await.unwrap().len(), 3);
        assert_eq!(seeder.reset().await.unwrap(), 3);
        assert_eq!(seeder.reset().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_rejects_bad_references() {
        let seeder = SeedUseCase::new(Arc::new(InMemoryTournamentRepository::new()));

        let data = SeedData::from_json(
            r#"{"events": [{"id": 1, "name": "Cup"}],
                "entrants": [{"id": 1, "event_id": 9, "name": "A"}]}"#,
        )
        .unwrap();
        let err = seeder.load(&data).await.unwrap_err();
        assert_eq!(err.to_string(), "Seed refers to unknown event 9");

        let data = SeedData::from_json(
            r#"{"events": [{"id": 1, "name": "Cup"}, {"id": 2, "name": "Open"}],
                "entrants": [{"id": 1, "event_id": 1, "name": "A"},
                             {"id": 2, "event_id": 2, "name": "B"}],
                "matches": [{"event_id": 2, "entrant1_id": 1, "entrant2_id": 2}]}"#,
        )
        .unwrap();
        let err = seeder.load(&data).await.unwrap_err();
        assert!(matches!(err, TournamentError::EntrantOutsideEvent));
    }
}
