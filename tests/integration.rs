// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use status_alert::alert::{Anchor, GesturePhase, LifecycleState, Style};
use status_alert::config::{self, Config};
use status_alert::render::{Backdrop, Visual};
use status_alert::runloop::TokioRunLoop;
use status_alert::test_utils::{Fixture, HostEvent, RecordingHost, F32_EPSILON};
use status_alert::{
    Announcement, Content, Environment, ImageHandle, PresentationMode, Presenter, ShowOptions,
    StyleOverrides, VerticalPosition,
};
use std::rc::Rc;
use std::time::Duration;
use tempfile::tempdir;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn assert_visual_eq(actual: Option<Visual>, expected: Visual) {
    let actual = actual.expect("host should have received a visual");
    assert_abs_diff_eq!(actual.scale, expected.scale, epsilon = F32_EPSILON);
    assert_abs_diff_eq!(actual.opacity, expected.opacity, epsilon = F32_EPSILON);
}

#[test]
fn title_only_alert_runs_full_timeline() {
    let fixture = Fixture::new();
    let alert = fixture
        .presenter
        .show(Content::title("StatusAlert"), ShowOptions::center());
    let id = alert.id();

    assert_eq!(alert.state(), LifecycleState::Presenting);
    assert_eq!(fixture.presenter.active_alerts(), vec![id]);
    assert_eq!(fixture.builder.builds(), 1);
    assert_eq!(fixture.host.events(), vec![HostEvent::Attached(id)]);
    assert_eq!(fixture.host.initial_visual(id), Some(Visual::hidden(0.9)));
    assert!(fixture.host.pick_gesture(id).is_none());
    assert!(fixture.announcer.announcements().is_empty());

    fixture.run_loop.advance(ms(200));
    assert_eq!(fixture.announcer.announcements(), vec!["StatusAlert"]);
    assert_visual_eq(fixture.host.last_visual(id), Visual::SHOWN);

    fixture.run_loop.advance(ms(1599));
    assert_eq!(alert.state(), LifecycleState::Presenting);

    fixture.run_loop.advance(ms(1));
    assert_eq!(alert.state(), LifecycleState::Dismissing);
    assert!(fixture.presenter.active_alerts().is_empty());
    assert!(!alert.is_interaction_enabled());

    fixture.run_loop.advance(ms(199));
    assert_eq!(alert.state(), LifecycleState::Dismissing);

    fixture.run_loop.advance(ms(1));
    assert_eq!(alert.state(), LifecycleState::Removed);
    assert_visual_eq(fixture.host.last_visual(id), Visual::hidden(0.9));
    assert_eq!(
        fixture.host.events(),
        vec![
            HostEvent::Attached(id),
            HostEvent::InteractionEnabled(id, false),
            HostEvent::Detached(id),
        ]
    );
    assert!(!fixture.presenter.is_busy());
    assert_eq!(fixture.builder.builds(), 1);
}

#[test]
fn empty_content_never_leaves_created() {
    let fixture = Fixture::new();

    for content in [
        Content::new(),
        Content::new().with_title("").with_message(""),
    ] {
        let alert = fixture.presenter.show(content, ShowOptions::center());
        assert_eq!(alert.state(), LifecycleState::Created);
    }

    fixture.run_loop.run_until_idle();
    assert_eq!(fixture.builder.builds(), 0);
    assert!(fixture.host.events().is_empty());
    assert_eq!(fixture.run_loop.pending_timers(), 0);
    assert_eq!(fixture.run_loop.pending_animations(), 0);
    assert!(fixture.announcer.announcements().is_empty());
    assert!(!fixture.presenter.is_busy());
}

#[test]
fn suppress_keeps_first_alert_and_drops_second() {
    let fixture = Fixture::new();
    let first = fixture
        .presenter
        .show(Content::title("first"), ShowOptions::center());
    fixture.run_loop.advance(ms(500));

    let second = fixture
        .presenter
        .show(Content::title("second"), ShowOptions::center());

    assert_eq!(second.state(), LifecycleState::Created);
    assert_eq!(first.state(), LifecycleState::Presenting);
    assert_eq!(fixture.host.attached(), vec![first.id()]);
    assert_eq!(fixture.builder.builds(), 1);

    assert!(!second.show(ShowOptions::center()));
    fixture.run_loop.advance(ms(1300));
    assert_eq!(first.state(), LifecycleState::Dismissing);
    assert!(second.show(ShowOptions::center()));
    assert_eq!(second.state(), LifecycleState::Presenting);
}

#[test]
fn replace_dismisses_current_before_new_one_presents() {
    let fixture = Fixture::new();
    fixture
        .presenter
        .set_presentation_mode(PresentationMode::ReplaceCurrent);

    let first = fixture
        .presenter
        .show(Content::title("first"), ShowOptions::center());
    fixture.run_loop.advance(ms(500));
    let second = fixture
        .presenter
        .show(Content::title("second"), ShowOptions::center());

    assert_eq!(first.state(), LifecycleState::Dismissing);
    assert_eq!(second.state(), LifecycleState::Presenting);
    assert_eq!(fixture.presenter.active_alerts(), vec![second.id()]);

    let events = fixture.host.events();
    let first_dismissing = events
        .iter()
        .position(|event| *event == HostEvent::InteractionEnabled(first.id(), false))
        .expect("first alert should start dismissing");
    let second_attached = events
        .iter()
        .position(|event| *event == HostEvent::Attached(second.id()))
        .expect("second alert should attach");
    assert!(first_dismissing < second_attached);

    fixture.run_loop.advance(ms(200));
    assert_eq!(first.state(), LifecycleState::Removed);
    assert_eq!(second.state(), LifecycleState::Presenting);
    assert_eq!(fixture.host.attached(), vec![second.id()]);
}

#[test]
fn allow_multiple_presents_concurrently() {
    let fixture = Fixture::new();
    fixture
        .presenter
        .set_presentation_mode(PresentationMode::AllowMultiple);

    let first = fixture
        .presenter
        .show(Content::title("first"), ShowOptions::top());
    let second = fixture
        .presenter
        .show(Content::title("second"), ShowOptions::bottom());

    assert!(first.is_presenting());
    assert!(second.is_presenting());
    assert_eq!(fixture.presenter.active_count(), 2);

    first.dismiss();
    assert_eq!(fixture.presenter.active_alerts(), vec![second.id()]);

    fixture.run_loop.run_until_idle();
    assert_eq!(first.state(), LifecycleState::Removed);
    assert_eq!(second.state(), LifecycleState::Removed);
    assert_eq!(fixture.presenter.active_count(), 0);
}

fn assert_show_is_ignored(fixture: &Fixture, alert: &status_alert::StatusAlert) {
    let active = fixture.presenter.active_count();
    assert!(!alert.show(ShowOptions::bottom()));
    assert_eq!(fixture.builder.builds(), 1);
    assert_eq!(
        fixture
            .host
            .count(|event| *event == HostEvent::Attached(alert.id())),
        1
    );
    assert_eq!(fixture.presenter.active_count(), active);
}

#[test]
fn show_after_leaving_created_has_no_effect() {
    for mode in [
        PresentationMode::SuppressIfBusy,
        PresentationMode::ReplaceCurrent,
        PresentationMode::AllowMultiple,
    ] {
        let fixture = Fixture::new();
        fixture.presenter.set_presentation_mode(mode);
        let alert = fixture
            .presenter
            .show(Content::title("again"), ShowOptions::center());
        let anchor = fixture.host.anchor(alert.id());

        assert_show_is_ignored(&fixture, &alert);
        assert_eq!(alert.state(), LifecycleState::Presenting);
        assert_eq!(fixture.presenter.active_alerts(), vec![alert.id()]);
        assert_eq!(fixture.host.anchor(alert.id()), anchor);

        fixture.run_loop.hold_animations(true);
        assert!(alert.dismiss());
        assert_show_is_ignored(&fixture, &alert);
        assert_eq!(alert.state(), LifecycleState::Dismissing);

        fixture.run_loop.hold_animations(false);
        fixture.run_loop.run_until_idle();
        assert_eq!(alert.state(), LifecycleState::Removed);
        assert_show_is_ignored(&fixture, &alert);
        assert_eq!(alert.state(), LifecycleState::Removed);
        assert_eq!(
            fixture
                .host
                .count(|event| *event == HostEvent::Detached(alert.id())),
            1
        );
    }
}

#[test]
fn double_dismiss_runs_one_exit() {
    let fixture = Fixture::new();
    let alert = fixture
        .presenter
        .show(Content::title("once"), ShowOptions::center());

    assert!(alert.dismiss());
    assert!(!alert.dismiss());
    assert_eq!(fixture.run_loop.pending_timers(), 0);

    fixture.run_loop.run_until_idle();
    assert!(!alert.dismiss());
    assert_eq!(alert.state(), LifecycleState::Removed);

    let id = alert.id();
    assert_eq!(
        fixture
            .host
            .count(|event| *event == HostEvent::InteractionEnabled(id, false)),
        1
    );
    assert_eq!(
        fixture.host.count(|event| *event == HostEvent::Detached(id)),
        1
    );
}

#[test]
fn active_pick_gesture_holds_back_auto_dismiss() {
    let fixture = Fixture::new();
    let alert = fixture
        .presenter
        .show(Content::title("hold"), ShowOptions::center().pickable(true));
    let gesture = fixture
        .host
        .pick_gesture(alert.id())
        .expect("pickable alerts carry a gesture");

    gesture.update(GesturePhase::Began);
    fixture.run_loop.advance(ms(1800));
    assert_eq!(alert.state(), LifecycleState::Presenting);

    gesture.update(GesturePhase::Changed);
    fixture.run_loop.advance(Duration::from_secs(10));
    assert_eq!(alert.state(), LifecycleState::Presenting);

    gesture.update(GesturePhase::Ended);
    assert_eq!(alert.state(), LifecycleState::Dismissing);

    fixture.run_loop.advance(ms(200));
    assert_eq!(alert.state(), LifecycleState::Removed);

    gesture.update(GesturePhase::Ended);
    assert_eq!(alert.state(), LifecycleState::Removed);
}

#[test]
fn pick_before_timer_dismisses_immediately() {
    let fixture = Fixture::new();
    let alert = fixture
        .presenter
        .show(Content::title("tap"), ShowOptions::center().pickable(true));
    let gesture = fixture
        .host
        .pick_gesture(alert.id())
        .expect("pickable alerts carry a gesture");

    fixture.run_loop.advance(ms(300));
    gesture.update(GesturePhase::Began);
    assert!(alert.is_presenting());
    gesture.update(GesturePhase::Cancelled);
    assert_eq!(alert.state(), LifecycleState::Dismissing);
    assert_eq!(fixture.run_loop.pending_timers(), 0);
}

#[test]
fn stalled_exit_leaves_alert_dismissing() {
    let fixture = Fixture::new();
    let alert = fixture
        .presenter
        .show(Content::title("stuck"), ShowOptions::center());
    fixture.run_loop.advance(ms(200));
    fixture.run_loop.hold_animations(true);

    fixture.run_loop.advance(Duration::from_secs(60));
    assert_eq!(alert.state(), LifecycleState::Dismissing);
    assert!(fixture.host.is_attached(alert.id()));

    let next = fixture
        .presenter
        .show(Content::title("next"), ShowOptions::center());
    assert!(next.is_presenting());
}

#[test]
fn anchors_follow_position_and_offset() {
    let fixture = Fixture::new();
    fixture
        .presenter
        .set_presentation_mode(PresentationMode::AllowMultiple);

    let cases = [
        (ShowOptions::top(), 32.0),
        (ShowOptions::center(), 0.0),
        (ShowOptions::bottom(), -32.0),
        (ShowOptions::top().with_offset(0.0), 0.0),
        (ShowOptions::bottom().with_offset(-80.0), -80.0),
    ];
    for (options, expected) in cases {
        let position = options.position;
        let alert = fixture.presenter.show(Content::title("anchored"), options);
        assert_eq!(
            fixture.host.anchor(alert.id()),
            Some(Anchor {
                position,
                constant: expected
            })
        );
    }
}

#[test]
fn explicit_host_takes_precedence_over_primary() {
    let fixture = Fixture::new();
    let secondary = Rc::new(RecordingHost::new());

    let alert = fixture.presenter.show(
        Content::title("elsewhere"),
        ShowOptions::at(VerticalPosition::Top).in_host(secondary.clone()),
    );

    assert!(secondary.is_attached(alert.id()));
    assert!(fixture.host.events().is_empty());

    fixture.run_loop.run_until_idle();
    assert!(!secondary.is_attached(alert.id()));
}

#[test]
fn transparency_change_swaps_backdrop() {
    let fixture = Fixture::new();
    let alert = fixture.presenter.show(
        Content::new()
            .with_image(ImageHandle::new("success"))
            .with_title("Saved"),
        ShowOptions::center(),
    );
    assert_eq!(alert.backdrop(), Some(Backdrop::Blur));

    fixture.blur.set(false);
    fixture.presenter.accessibility_settings_changed();
    fixture.presenter.accessibility_settings_changed();

    let solid = Backdrop::Solid(Style::default().background_color);
    assert_eq!(alert.backdrop(), Some(solid));
    assert_eq!(
        fixture
            .host
            .count(|event| matches!(event, HostEvent::Backdrop(..))),
        1
    );
    assert!(fixture
        .host
        .events()
        .contains(&HostEvent::Backdrop(alert.id(), solid)));
}

#[test]
fn announcements_follow_configuration() {
    let fixture = Fixture::new();
    fixture
        .presenter
        .set_presentation_mode(PresentationMode::AllowMultiple);
    let content = Content::new()
        .with_title("Loved")
        .with_message("We’ll recommend more like this in For You.");

    fixture
        .presenter
        .show(content.clone(), ShowOptions::center());
    fixture
        .presenter
        .alert(content.clone())
        .announcement(Announcement::text("Added to Loved"))
        .show(ShowOptions::center());
    fixture
        .presenter
        .alert(content)
        .silent()
        .show(ShowOptions::center());

    fixture.run_loop.advance(ms(200));
    assert_eq!(
        fixture.announcer.announcements(),
        vec![
            "Loved, We’ll recommend more like this in For You.",
            "Added to Loved",
        ]
    );
}

#[test]
fn style_overrides_shape_the_timeline() {
    let fixture = Fixture::new();
    let alert = fixture
        .presenter
        .alert(Content::title("quick"))
        .style_overrides(&StyleOverrides {
            display_duration_ms: Some(1000),
            fade_duration_ms: Some(100),
            ..StyleOverrides::default()
        })
        .show(ShowOptions::center());

    fixture.run_loop.advance(ms(899));
    assert!(alert.is_presenting());
    fixture.run_loop.advance(ms(1));
    assert_eq!(alert.state(), LifecycleState::Dismissing);
    fixture.run_loop.advance(ms(100));
    assert_eq!(alert.state(), LifecycleState::Removed);
}

#[test]
fn presenter_from_saved_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    let saved = Config {
        mode: PresentationMode::AllowMultiple,
        style: StyleOverrides {
            corner_radius: Some(16.0),
            ..StyleOverrides::default()
        },
    };
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    let fixture = Fixture::new();
    let presenter = Presenter::with_config(fixture.presenter.environment().clone(), &loaded);

    let first = presenter.show(Content::title("first"), ShowOptions::center());
    let second = presenter.show(Content::title("second"), ShowOptions::center());
    assert!(first.is_presenting() && second.is_presenting());
    assert_eq!(first.style().corner_radius, 16.0);

    let tree = fixture.host.tree(first.id()).expect("attached");
    assert_eq!(tree.container.corner_radius, 16.0);

    dir.close().expect("Failed to close temporary directory");
}

#[tokio::test(start_paused = true)]
async fn tokio_run_loop_drives_lifecycle() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let host = Rc::new(RecordingHost::new());
            let env = Environment::on_run_loop(host.clone(), Rc::new(TokioRunLoop::default()));
            let presenter = Presenter::new(env);

            let alert = presenter.show(Content::title("StatusAlert"), ShowOptions::center());
            assert!(alert.is_presenting());

            tokio::time::sleep(ms(1700)).await;
            assert!(alert.is_presenting());
            assert_visual_eq(host.last_visual(alert.id()), Visual::SHOWN);

            tokio::time::sleep(ms(200)).await;
            assert_eq!(alert.state(), LifecycleState::Dismissing);

            tokio::time::sleep(ms(400)).await;
            assert_eq!(alert.state(), LifecycleState::Removed);
            assert!(!host.is_attached(alert.id()));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn tokio_dismiss_during_entrance_fades_out_from_where_it_was() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let host = Rc::new(RecordingHost::new());
            let env = Environment::on_run_loop(host.clone(), Rc::new(TokioRunLoop::default()));
            let presenter = Presenter::new(env);
            presenter.set_presentation_mode(PresentationMode::ReplaceCurrent);

            let alert = presenter.show(Content::title("brief"), ShowOptions::center());
            tokio::time::sleep(ms(50)).await;
            let reached = host
                .last_visual(alert.id())
                .expect("entrance should have started");
            let before = host.visual_count(alert.id());

            let next = presenter.show(Content::title("next"), ShowOptions::center());
            assert_eq!(alert.state(), LifecycleState::Dismissing);
            assert!(next.is_presenting());

            tokio::time::sleep(ms(400)).await;
            assert_eq!(alert.state(), LifecycleState::Removed);

            let fade = &host.visuals(alert.id())[before..];
            assert!(!fade.is_empty());
            assert!(fade[0].opacity <= reached.opacity);
            assert!(fade
                .windows(2)
                .all(|pair| pair[1].opacity <= pair[0].opacity));
            assert_visual_eq(fade.last().copied(), Visual::hidden(0.9));
        })
        .await;
}
