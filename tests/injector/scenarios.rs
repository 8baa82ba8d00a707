//! End-to-end theme scenarios against real files and the `grass` compiler.

use std::sync::Arc;

use css_injector::theme::{
    FsLoader, GrassCompiler, ImportResolver, imports::has_partial_reference,
};
use css_injector::{ApplyOutcome, Injector, ThemeError, ThemeId};

use crate::doubles::{CountingCompiler, EmptyLoader, RecordingHost};
use crate::fixtures::{app_with_themes, squash, standard_app, write_theme};

#[tokio::test]
/// What: The reference scenario from a theme using `@use "base";`.
///
/// Inputs:
/// - `dark.scss` = `@use "base";\nbody { color: red; }`, `base.scss` = `$x: 1;`, empty mappings.
///
/// Output:
/// - Injected stylesheet is `body { color: red !important; }` modulo whitespace.
async fn dark_theme_with_base_partial_compiles_to_forced_css() {
    let (_root, cfg) = app_with_themes(&[
        ("base.scss", "$x: 1;"),
        ("mappings.scss", ""),
        ("dark.scss", "@use \"base\";\nbody { color: red; }"),
    ]);
    let resolved = ImportResolver::new(&FsLoader, &cfg.theme_paths())
        .resolve("@use \"base\";\nbody { color: red; }")
        .expect("resolve");
    assert_eq!(resolved, "$x: 1;\nbody { color: red; }");

    let host = Arc::new(RecordingHost::new());
    let mut injector = Injector::new(cfg, &host);
    let outcome = injector.apply_theme("dark").await.expect("apply");
    assert_eq!(outcome, ApplyOutcome::Applied);
    let key = injector.theme().active_key().cloned().expect("key");
    assert_eq!(
        squash(host.log().css_for(&key).expect("css")),
        "body { color: red !important; }"
    );
}

#[tokio::test]
/// What: `mappings` reached through `base` is inlined and compiled with shared variables.
///
/// Inputs:
/// - Standard fixture where `base` imports `mappings` and `mappings` extends a placeholder from `base`.
///
/// Output:
/// - Resolved source has no partial references; CSS carries values from both partials, all forced.
async fn partials_share_variables_and_placeholders() {
    let (root, cfg) = standard_app();
    let source = std::fs::read_to_string(root.path().join("src/themes/dark.scss")).expect("read");
    let resolved = ImportResolver::new(&FsLoader, &cfg.theme_paths())
        .resolve(&source)
        .expect("resolve");
    assert!(!has_partial_reference(&resolved));
    assert!(resolved.contains("@extend %surface"));

    let host = Arc::new(RecordingHost::new());
    let injector = Injector::new(cfg, &host);
    let css = squash(&injector.theme().render(&ThemeId::new("dark")).expect("render"));
    assert!(css.contains("background: #111 !important;"), "{css}");
    assert!(css.contains("color: #eee !important;"), "{css}");
    assert!(!css.contains("%surface"), "{css}");
    assert_eq!(css.matches(';').count(), css.matches(" !important;").count());
    assert!(host.log().inserted.is_empty(), "render must not inject");
}

#[tokio::test]
/// What: Theme variables declared before the `base` reference override `!default`s.
///
/// Inputs:
/// - `light.scss` sets `$bg` then imports `base.scss` without a terminator.
///
/// Output:
/// - Background uses the theme's value.
async fn theme_overrides_defaults_from_base() {
    let (_root, cfg) = standard_app();
    let host = Arc::new(RecordingHost::new());
    let injector = Injector::new(cfg, &host);
    let css = squash(&injector.theme().render(&ThemeId::new("light")).expect("render"));
    assert!(css.contains("#fff !important;"), "{css}");
    assert!(css.contains("color: black !important;"), "{css}");
}

#[tokio::test]
/// What: Partials are re-read on every apply.
///
/// Inputs:
/// - Apply `dark`, edit `base.scss`, apply `dark` again.
///
/// Output:
/// - Second stylesheet reflects the edited partial; the first key was revoked once.
async fn partial_edits_are_picked_up_on_next_apply() {
    let (root, cfg) = app_with_themes(&[
        ("base.scss", "$fg: red;"),
        ("mappings.scss", ""),
        ("dark.scss", "@use 'base';\na { color: $fg; }"),
    ]);
    let host = Arc::new(RecordingHost::new());
    let mut injector = Injector::new(cfg, &host);
    injector.apply_theme("dark").await.expect("first");
    let first = injector.theme().active_key().cloned().expect("first key");
    write_theme(root.path(), "base.scss", "$fg: green;");
    injector.apply_theme("dark").await.expect("second");
    let second = injector.theme().active_key().cloned().expect("second key");
    let log = host.log();
    assert!(log.css_for(&second).expect("css").contains("green !important"));
    assert_eq!(log.removal_count(&first), 1);
    assert_eq!(log.live(), vec![second]);
}

#[tokio::test]
/// What: Unknown theme names fail to blank.
///
/// Inputs:
/// - Apply `dark`, then `does-not-exist`.
///
/// Output:
/// - `NotFound` error; the previous theme is gone and nothing is tracked.
async fn unknown_theme_leaves_window_unthemed() {
    let (_root, cfg) = standard_app();
    let host = Arc::new(RecordingHost::new());
    let mut injector = Injector::new(cfg, &host);
    injector.apply_theme("dark").await.expect("dark");
    let err = injector
        .apply_theme("does-not-exist")
        .await
        .expect_err("missing");
    assert!(err.is_not_found());
    assert!(injector.theme().active_key().is_none());
    assert!(host.log().live().is_empty());
}

#[tokio::test]
/// What: Unquoted partial references are left for the compiler to reject.
///
/// Inputs:
/// - Theme containing `@use base;`.
///
/// Output:
/// - `ThemeError::Compile`; nothing injected.
async fn malformed_reference_surfaces_as_compile_error() {
    let (_root, cfg) = app_with_themes(&[
        ("base.scss", "$x: 1;"),
        ("mappings.scss", ""),
        ("broken.scss", "@use base;\na { b: c; }"),
    ]);
    let host = Arc::new(RecordingHost::new());
    let mut injector = Injector::new(cfg, &host);
    let err = injector.apply_theme("broken").await.expect_err("compile");
    assert!(matches!(err, ThemeError::Compile(_)), "{err}");
    assert!(host.log().inserted.is_empty());
}

#[tokio::test]
/// What: Themes that reference no partial still apply.
///
/// Inputs:
/// - Self-contained theme with two declarations.
///
/// Output:
/// - Both declarations forced, one key live.
async fn self_contained_theme_applies() {
    let (_root, cfg) = app_with_themes(&[
        ("base.scss", "$unused: 0;"),
        ("mappings.scss", ""),
        ("plain.scss", "p { margin: 0; padding: 0; }"),
    ]);
    let host = Arc::new(RecordingHost::new());
    let mut injector = Injector::new(cfg, &host);
    injector.apply_theme("plain").await.expect("apply");
    let key = injector.theme().active_key().cloned().expect("key");
    assert_eq!(
        squash(host.log().css_for(&key).expect("css")),
        "p { margin: 0 !important; padding: 0 !important; }"
    );
}

#[tokio::test]
/// What: The reserved theme performs no filesystem reads or compilations.
///
/// Inputs:
/// - Injector with counting loader and compiler; apply `default` twice.
///
/// Output:
/// - Zero reads, zero compilations, nothing injected.
async fn reserved_theme_touches_nothing() {
    let (_root, cfg) = standard_app();
    let host = Arc::new(RecordingHost::new());
    let mut injector = Injector::new(cfg, &host)
        .with_loader(EmptyLoader::default())
        .with_compiler(CountingCompiler::new(GrassCompiler));
    for _ in 0..2 {
        assert_eq!(
            injector.apply_theme("default").await.expect("default"),
            ApplyOutcome::Cleared
        );
    }
    assert_eq!(injector.theme().loader().reads(), 0);
    assert_eq!(injector.theme().compiler().calls(), 0);
    assert!(host.log().inserted.is_empty());
    assert!(host.log().removed.is_empty());
}

#[test]
/// What: The theme catalogue lists selectable themes only.
///
/// Inputs:
/// - Standard fixture.
///
/// Output:
/// - `default`, `dark`, `light`.
fn catalogue_lists_themes_without_partials() {
    let (_root, cfg) = standard_app();
    let host = Arc::new(RecordingHost::new());
    let injector = Injector::new(cfg, &host);
    let names: Vec<String> = injector
        .available_themes()
        .into_iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(names, vec!["default", "dark", "light"]);
}
