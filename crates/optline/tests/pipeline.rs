//! End-to-end runs of the registration, translation and execution
//! pipeline against a registry shaped like a small downloader CLI.

use std::cell::RefCell;
use std::rc::Rc;

use optline::{
    FlagCell, HandlerError, Opt, Outcome, Registry, RunError, SetupError, SlotType, SlotValue,
    UsageError, exec, sig, slot,
};

fn argv(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn usage(err: RunError) -> UsageError {
    match err {
        RunError::Usage(e) => e,
        RunError::Handler(e) => panic!("expected usage error, got handler error: {e}"),
    }
}

struct App {
    registry: Registry,
    audio_only: FlagCell,
    resolution: optline::Slot,
    quality: optline::Slot,
    greeted: Rc<RefCell<Vec<String>>>,
}

fn app() -> App {
    let mut registry = Registry::new();

    let audio_only = FlagCell::new();
    registry
        .register(
            Opt::flag(
                "a",
                "audio-only",
                audio_only.clone(),
                "Download the audio track only",
            )
            .unwrap(),
        )
        .unwrap();

    let resolution = slot(720i64)
        .named("height")
        .typed(SlotType::Int)
        .build()
        .unwrap();
    let quality = slot(10i64)
        .named("quality")
        .typed(SlotType::Int)
        .optional()
        .build()
        .unwrap();
    registry
        .register(
            Opt::var(
                "r",
                "resolution",
                vec![resolution.clone(), quality.clone()],
                "Pick a target resolution",
            )
            .unwrap(),
        )
        .unwrap();

    let greeted: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&greeted);
    registry
        .register(
            Opt::func(
                "g",
                "greet",
                sig().required("name").optional("times").build().unwrap(),
                move |tokens| {
                    let times = match tokens.get(1) {
                        Some(t) => t.parse::<usize>().map_err(|e| e.to_string())?,
                        None => 1,
                    };
                    for _ in 0..times {
                        sink.borrow_mut().push(tokens[0].clone());
                    }
                    Ok(())
                },
                "Greet someone",
            )
            .unwrap(),
        )
        .unwrap();

    App {
        registry,
        audio_only,
        resolution,
        quality,
        greeted,
    }
}

#[test]
fn registered_options_answer_to_both_names() {
    let app = app();
    let by_short = app.registry.find_short("r").unwrap();
    let by_long = app.registry.find_long("resolution").unwrap();
    assert_eq!(by_short.long(), by_long.long());
    assert_eq!(by_short.short(), "r");
}

#[test]
fn name_collisions_are_rejected_across_fields() {
    let mut app = app();
    // Existing long reused as a short name.
    let err = app
        .registry
        .register(Opt::flag("greet", "gamma", FlagCell::new(), "").unwrap())
        .unwrap_err();
    assert!(matches!(err, SetupError::NameInUse(_)));
    // Existing short reused as a long name.
    let err = app
        .registry
        .register(Opt::flag("z", "a", FlagCell::new(), "").unwrap())
        .unwrap_err();
    assert!(matches!(err, SetupError::NameInUse(_)));
}

#[test]
fn flag_and_var_options_apply_their_tokens() {
    let app = app();
    let outcome = exec(&app.registry, &argv("-a --resolution 1080")).unwrap();
    assert!(matches!(outcome, Outcome::Completed));
    assert!(app.audio_only.get());
    assert_eq!(app.resolution.value(), SlotValue::Int(1080));
    // The optional slot kept its default.
    assert_eq!(app.quality.value(), SlotValue::Int(10));
}

#[test]
fn var_option_fills_optional_slots_when_tokens_arrive() {
    let app = app();
    exec(&app.registry, &argv("-r 480 7")).unwrap();
    assert_eq!(app.resolution.value(), SlotValue::Int(480));
    assert_eq!(app.quality.value(), SlotValue::Int(7));
}

#[test]
fn var_option_rejects_a_third_token() {
    let app = app();
    let err = usage(exec(&app.registry, &argv("-r 480 7 9")).unwrap_err());
    assert_eq!(
        err.to_string(),
        "--resolution takes 2 positional arguments but 3 were given"
    );
}

#[test]
fn var_option_coercion_failure_names_the_param() {
    let app = app();
    let err = usage(exec(&app.registry, &argv("-r high")).unwrap_err());
    assert_eq!(
        err.to_string(),
        "Unable to convert 1 param of --resolution into int"
    );
}

#[test]
fn aterisk_option_absorbs_everything_after_the_required_slots() {
    let mut registry = Registry::new();
    let program = slot(".").named("program").build().unwrap();
    let args = slot(Vec::<String>::new()).named("args").aterisk().build().unwrap();
    registry
        .register(Opt::var("c", "cmd", vec![program.clone(), args.clone()], "").unwrap())
        .unwrap();

    exec(&registry, &argv("--cmd ffmpeg -i input.mp4 out.mp3")).unwrap_err();
    // `-i` reads as an unknown flag; quoting is the shell's job. A clean
    // tail goes through.
    exec(&registry, &argv("--cmd ffmpeg input.mp4 out.mp3")).unwrap();
    assert_eq!(program.value(), SlotValue::Str("ffmpeg".to_string()));
    assert_eq!(
        args.value(),
        SlotValue::List(vec!["input.mp4".to_string(), "out.mp3".to_string()])
    );
}

#[test]
fn unknown_flag_reports_the_token_verbatim() {
    let app = app();
    let err = usage(exec(&app.registry, &argv("-x")).unwrap_err());
    assert_eq!(err.to_string(), "No option named: -x");
    let err = usage(exec(&app.registry, &argv("--nope")).unwrap_err());
    assert_eq!(err.to_string(), "No option named: --nope");
}

#[test]
fn value_before_any_flag_is_rejected() {
    let app = app();
    let err = usage(exec(&app.registry, &argv("1080 -a")).unwrap_err());
    assert_eq!(err.to_string(), "No option before value: 1080");
}

#[test]
fn functional_option_runs_with_positional_tokens() {
    let app = app();
    exec(&app.registry, &argv("--greet Bob 3")).unwrap();
    assert_eq!(*app.greeted.borrow(), ["Bob", "Bob", "Bob"]);
}

#[test]
fn functional_option_with_too_few_tokens_is_a_param_error() {
    let app = app();
    let err = usage(exec(&app.registry, &argv("--greet")).unwrap_err());
    assert_eq!(
        err.to_string(),
        "--greet missing 1 required positional argument: 'name'"
    );
}

#[test]
fn handler_failures_surface_as_run_errors() {
    let app = app();
    match exec(&app.registry, &argv("--greet Bob many")).unwrap_err() {
        RunError::Handler(e) => assert!(e.to_string().contains("invalid digit")),
        RunError::Usage(e) => panic!("expected handler error, got usage error: {e}"),
    }
}

#[test]
fn repeated_option_keeps_only_the_last_occurrence() {
    let app = app();
    exec(&app.registry, &argv("-r 480 -a -r 1080")).unwrap();
    assert_eq!(app.resolution.value(), SlotValue::Int(1080));
    assert!(app.audio_only.get());
}

#[test]
fn deliberate_exit_skips_later_groups() {
    let mut registry = Registry::new();
    let later = FlagCell::new();
    registry
        .register(
            Opt::func(
                "V",
                "version",
                sig().build().unwrap(),
                |_| Err(HandlerError::exit("0.1.0")),
                "Print the version",
            )
            .unwrap(),
        )
        .unwrap();
    registry
        .register(Opt::flag("a", "audio-only", later.clone(), "").unwrap())
        .unwrap();

    match exec(&registry, &argv("--version -a")).unwrap() {
        Outcome::Exited(t) => assert_eq!(t.message, "0.1.0"),
        Outcome::Completed => panic!("expected a deliberate exit"),
    }
    assert!(!later.get());
}

#[test]
fn help_lines_recover_each_option_identity() {
    let app = app();
    let text = app.registry.render_help();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Usage: [options]");
    assert_eq!(lines[1], "OPTIONS:");

    for line in &lines[2..] {
        let short_col = line.split(" | ").next().unwrap().trim_end();
        let short = short_col
            .trim_start_matches('-')
            .split_whitespace()
            .next()
            .unwrap();
        assert!(
            app.registry.find_short(short).is_some(),
            "help line does not name a registered option: {line}"
        );
    }
    // One line per registered option, help included.
    assert_eq!(lines.len() - 2, app.registry.len());
}

#[test]
fn help_output_is_stable_across_renders() {
    let app = app();
    assert_eq!(app.registry.render_help(), app.registry.render_help());
}

#[test]
fn builtin_help_terminates_with_the_table() {
    let app = app();
    match exec(&app.registry, &argv("-h")).unwrap() {
        Outcome::Exited(t) => {
            assert_eq!(t.message, app.registry.render_help());
            assert!(t.message.contains("--help"));
            assert!(t.message.contains("--resolution height [quality]"));
        }
        Outcome::Completed => panic!("help should terminate deliberately"),
    }
}
