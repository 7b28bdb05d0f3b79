use fitness_companion::navigation::{HomeTab, OnboardingStep};
use fitness_companion::{App, open_store};
use fitness_companion_core::activity::ActivityConfig;
use fitness_companion_core::profile_setup::{ContactDetails, Gender, Goal, Navigation, SetupStep};

async fn app_at(path: &std::path::Path) -> App {
    let store = open_store(Some(path)).await.unwrap();
    App::new(store, None, ActivityConfig::default())
}

#[tokio::test]
async fn account_and_profile_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    {
        let mut app = app_at(&path).await;
        app.onboarding.next();
        assert_eq!(app.onboarding.skip(), OnboardingStep::Finished);

        app.auth
            .register("ana@duoc.cl", "Segura123", "Segura123")
            .await
            .unwrap();

        let mut setup = app.profile.begin_setup().await.unwrap();
        assert_eq!(setup.contact().email, "ana@duoc.cl");
        assert_eq!(setup.advance(), Navigation::Moved(SetupStep::Gender));
        setup.select_gender(Gender::Female).unwrap();
        setup.set_age(31).unwrap();
        setup.advance();
        setup.advance();
        setup.advance();
        assert_eq!(setup.step(), SetupStep::Goal);
        setup.select_goal(Goal::ALL[0]).unwrap();
        setup
            .select_activity_level(Default::default())
            .unwrap();
        setup.set_contact(ContactDetails {
            full_name: "Ana Perez".into(),
            email: "ana@duoc.cl".into(),
            ..ContactDetails::default()
        });
        app.profile.finish_setup(&setup).await.unwrap();
        assert!(app.profile.set_bio("trail runner").await.unwrap());
    }

    let mut app = app_at(&path).await;
    app.auth.login("ana@duoc.cl", "Segura123").await.unwrap();
    assert_eq!(app.welcome_message().await.unwrap(), "Welcome, Ana Perez!");
    let p = app.profile.profile();
    assert_eq!(p.gender, "Female");
    assert_eq!(p.bio, "trail runner");
    assert_eq!(app.tabs.select_index(HomeTab::Profile.index()), HomeTab::Profile);
}

#[tokio::test]
async fn logout_empties_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    let app = app_at(&path).await;
    app.auth
        .register("a@b.com", "abc123", "abc123")
        .await
        .unwrap();
    app.auth.logout().await.unwrap();

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, serde_json::json!({}));

    let reopened = app_at(&path).await;
    assert!(reopened.auth.login("a@b.com", "abc123").await.is_err());
}
