//! Integration tests for template evaluation.
//!
//! Renders parsed templates against runtime contexts with English and
//! Russian rule resolvers, covering every construct plus the
//! empty-on-unresolved and fallback-branch policies.

use xmessage::{CldrRules, Context, RuleError, Value, parse_template, render, tokens};

fn eval(template: &str, ctx: &Context, rules: &CldrRules) -> String {
    render(&parse_template(template), ctx, rules).unwrap()
}

fn en(template: &str, ctx: &Context) -> String {
    eval(template, ctx, &CldrRules::new("en"))
}

// =============================================================================
// Simple substitution
// =============================================================================

#[test]
fn test_positional_substitution() {
    assert_eq!(en("Hello {0}", &Context::positional(["World"])), "Hello World");
}

#[test]
fn test_named_substitution() {
    let ctx = tokens! { "name" => "Michael" };
    assert_eq!(en("Hello {name}", &ctx), "Hello Michael");
}

#[test]
fn test_dot_path_substitution() {
    let user = Value::Map(
        [("name".to_string(), Value::String("Michael".to_string()))]
            .into_iter()
            .collect(),
    );
    let ctx = tokens! { "user" => user };
    assert_eq!(en("Hello {user.name}", &ctx), "Hello Michael");
}

#[test]
fn test_entity_displays_its_value() {
    let ctx = tokens! { "user" => Value::entity("Michael", "male") };
    assert_eq!(en("Hello {user}", &ctx), "Hello Michael");
}

#[test]
fn test_unresolved_reference_renders_empty() {
    assert_eq!(en("Hello {name}!", &Context::new()), "Hello !");
    assert_eq!(en("Hello {5}!", &Context::positional(["x"])), "Hello !");
}

#[test]
fn test_literal_escapes_survive_rendering() {
    assert_eq!(
        en("{{0}} is {0}", &Context::positional(["zero"])),
        "{0} is zero"
    );
}

// =============================================================================
// Numbers
// =============================================================================

#[test]
fn test_number_construct() {
    let ctx = tokens! { "numViews" => 4 };
    assert_eq!(en("{:numViews,number} views", &ctx), "4 views");
}

#[test]
fn test_integer_style_truncates_floats() {
    let ctx = tokens! { "numViews" => 4.7 };
    assert_eq!(en("{:numViews,number,integer} views", &ctx), "4 views");
}

#[test]
fn test_number_from_numeric_string() {
    let ctx = tokens! { "count" => "12" };
    assert_eq!(en("{count,number}", &ctx), "12");
}

#[test]
fn test_number_from_non_numeric_value_renders_empty() {
    let ctx = tokens! { "count" => "dozens" };
    assert_eq!(en("({count,number})", &ctx), "()");
}

// =============================================================================
// Choice branching
// =============================================================================

#[test]
fn test_plural_choice() {
    let template = "{0} {0,choice,singular#member|plural#members}";
    assert_eq!(en(template, &Context::positional([1])), "1 member");
    assert_eq!(en(template, &Context::positional([5])), "5 members");
}

#[test]
fn test_cldr_keys_match_legacy_vocabulary() {
    let template = "{0,choice,one#member|other#members}";
    assert_eq!(en(template, &Context::positional([1])), "member");
    assert_eq!(en(template, &Context::positional([5])), "members");
}

#[test]
fn test_gender_choice() {
    let template = "{0,choice,male#He|female#She|other#He/She} liked it";
    let male = Context::positional([Value::entity("Michael", "male")]);
    let female = Context::positional([Value::entity("Anna", "female")]);
    assert_eq!(en(template, &male), "He liked it");
    assert_eq!(en(template, &female), "She liked it");
}

#[test]
fn test_choice_falls_back_to_other_branch() {
    let template = "{0,choice,male#He|other#They}";
    assert_eq!(en(template, &Context::new()), "They");
}

#[test]
fn test_choice_without_other_falls_back_to_last_branch() {
    let template = "{0,choice,male#He|female#She}";
    assert_eq!(en(template, &Context::new()), "She");
}

#[test]
fn test_nested_choice_with_map_and_number() {
    let template = "{0} tagged himself in {1,choice,\
        singular#{1,number} {2,map,photo#photo|video#video}|\
        plural#{1,number} {2,map,photo#photos|video#videos}}";

    let one_photo = Context::positional([
        Value::String("Michael".to_string()),
        Value::Number(1),
        Value::String("photo".to_string()),
    ]);
    assert_eq!(en(template, &one_photo), "Michael tagged himself in 1 photo");

    let five_videos = Context::positional([
        Value::String("Michael".to_string()),
        Value::Number(5),
        Value::String("video".to_string()),
    ]);
    assert_eq!(
        en(template, &five_videos),
        "Michael tagged himself in 5 videos"
    );
}

#[test]
fn test_map_nesting_choice() {
    // Same message with the nesting inverted: the map branches on the media
    // kind and each branch embeds a plural choice.
    let template = "{1,map,\
        photo#{0,number} {0,choice,singular#photo|plural#photos}|\
        video#{0,number} {0,choice,singular#video|plural#videos}}";

    let ctx = Context::positional([Value::Number(3), Value::String("photo".to_string())]);
    assert_eq!(en(template, &ctx), "3 photos");

    let ctx = Context::positional([Value::Number(1), Value::String("video".to_string())]);
    assert_eq!(en(template, &ctx), "1 video");
}

// =============================================================================
// Map branching
// =============================================================================

#[test]
fn test_map_exact_match() {
    let template = "{gender,map,male#Mr|female#Mrs|other#Mx}";
    assert_eq!(en(template, &tokens! { "gender" => "female" }), "Mrs");
}

#[test]
fn test_map_fallback_to_other_key() {
    let template = "{gender,map,male#Mr|other#Mx}";
    assert_eq!(en(template, &tokens! { "gender" => "unknown" }), "Mx");
}

#[test]
fn test_map_without_match_renders_empty() {
    let template = "({gender,map,male#Mr|female#Mrs})";
    assert_eq!(en(template, &tokens! { "gender" => "unknown" }), "()");
    assert_eq!(en(template, &Context::new()), "()");
}

// =============================================================================
// Anchors and links
// =============================================================================

#[test]
fn test_anchor_with_string_href() {
    let template = "You have {0,anchor,text#messages}.";
    assert_eq!(
        en(template, &Context::positional(["google.com"])),
        "You have <a href='google.com'>messages</a>."
    );
}

#[test]
fn test_link_with_token_object() {
    let template = "You have {:link,link,text#{count} messages}.";
    let mut ctx = Context::new();
    ctx.insert("link", Value::link("google.com"));
    ctx.insert("count", 5);
    assert_eq!(
        en(template, &ctx),
        "You have <a href='google.com'>5 messages</a>."
    );
}

#[test]
fn test_anchor_with_unresolved_href() {
    let template = "{0,anchor,text#messages}";
    assert_eq!(en(template, &Context::new()), "<a href=''>messages</a>");
}

// =============================================================================
// Plural shorthands
// =============================================================================

#[test]
fn test_two_form_shorthand() {
    let template = "You have {count || message, messages}";
    assert_eq!(en(template, &tokens! { "count" => 1 }), "You have 1 message");
    assert_eq!(en(template, &tokens! { "count" => 5 }), "You have 5 messages");
}

#[test]
fn test_single_form_shorthand_pluralizes_mechanically() {
    let template = "{count || message}";
    assert_eq!(en(template, &tokens! { "count" => 1 }), "1 message");
    assert_eq!(en(template, &tokens! { "count" => 5 }), "5 messages");

    let template = "{count || box}";
    assert_eq!(en(template, &tokens! { "count" => 2 }), "2 boxes");

    let template = "{count || category}";
    assert_eq!(en(template, &tokens! { "count" => 2 }), "2 categories");
}

#[test]
fn test_single_form_shorthand_under_non_english_rules() {
    // The single written form is reused verbatim for languages without a
    // mechanical pluralizer, whatever language the template text is in.
    let ru = CldrRules::new("ru");
    let template = "You have {count || message}";
    assert_eq!(eval(template, &tokens! { "count" => 1 }, &ru), "You have 1 message");
    assert_eq!(eval(template, &tokens! { "count" => 5 }, &ru), "You have 5 message");
}

#[test]
fn test_russian_positional_shorthand() {
    let ru = CldrRules::new("ru");
    let template = "У вас есть {count || сообщение, сообщения, сообщений}";
    assert_eq!(
        eval(template, &tokens! { "count" => 1 }, &ru),
        "У вас есть 1 сообщение"
    );
    assert_eq!(
        eval(template, &tokens! { "count" => 2 }, &ru),
        "У вас есть 2 сообщения"
    );
    assert_eq!(
        eval(template, &tokens! { "count" => 5 }, &ru),
        "У вас есть 5 сообщений"
    );
}

#[test]
fn test_russian_labeled_shorthand() {
    let ru = CldrRules::new("ru");
    let template = "{count || one: сообщение, few: сообщения, other: сообщений}";
    assert_eq!(eval(template, &tokens! { "count" => 1 }, &ru), "1 сообщение");
    assert_eq!(eval(template, &tokens! { "count" => 3 }, &ru), "3 сообщения");
    // "many" has no labeled form, so the "other" form covers it.
    assert_eq!(eval(template, &tokens! { "count" => 11 }, &ru), "11 сообщений");
}

#[test]
fn test_shorthand_with_non_numeric_value() {
    let template = "{count || message, messages}";
    assert_eq!(en(template, &tokens! { "count" => "many" }), "many");
}

// =============================================================================
// Cases and gendered word forms
// =============================================================================

#[test]
fn test_registered_case_inflection() {
    let mut ru = CldrRules::new("ru");
    ru.register_case("gen", |name: &str| match name {
        "Михаил" => "Михаила".to_string(),
        other => other.to_string(),
    });
    let ctx = tokens! { "user" => "Михаил" };
    assert_eq!(
        eval("Вы пригласили {user::gen}", &ctx, &ru),
        "Вы пригласили Михаила"
    );
}

#[test]
fn test_builtin_cases() {
    let ctx = tokens! { "word" => "hello" };
    assert_eq!(en("{word::upper}", &ctx), "HELLO");
    assert_eq!(en("{word::cap}", &ctx), "Hello");
    let ctx = tokens! { "word" => "HELLO" };
    assert_eq!(en("{word::lower}", &ctx), "hello");
}

#[test]
fn test_unknown_case_is_an_error() {
    let tree = parse_template("{word::genitive}");
    let ctx = tokens! { "word" => "hello" };
    let err = render(&tree, &ctx, &CldrRules::new("en")).unwrap_err();
    assert!(matches!(err, RuleError::UnknownCase { .. }));
}

#[test]
fn test_gendered_word_forms() {
    let template = "{user} updated {user | his, her} profile";
    let male = tokens! { "user" => Value::entity("Michael", "male") };
    let female = tokens! { "user" => Value::entity("Anna", "female") };
    assert_eq!(en(template, &male), "Michael updated his profile");
    assert_eq!(en(template, &female), "Anna updated her profile");
}

#[test]
fn test_gendered_word_forms_fall_back_to_first() {
    let template = "{user | his, her}";
    let ctx = tokens! { "user" => "Michael" };
    assert_eq!(en(template, &ctx), "his");
}

// =============================================================================
// Decorations
// =============================================================================

#[test]
fn test_decorator_from_context_registry() {
    let mut ctx = Context::new();
    ctx.set_decorator("bold", "<strong>{$0}</strong>");
    assert_eq!(en("Hello [bold: World]", &ctx), "Hello <strong>World</strong>");
}

#[test]
fn test_decorator_with_bare_placeholder() {
    let mut ctx = Context::new();
    ctx.set_decorator("italic", "<i>$0</i>");
    assert_eq!(en("[italic: World]", &ctx), "<i>World</i>");
}

#[test]
fn test_decorator_from_context_value() {
    let ctx = tokens! { "bold" => "<b>{$0}</b>" };
    assert_eq!(en("[bold: World]", &ctx), "<b>World</b>");
}

#[test]
fn test_link_value_decorates_as_anchor() {
    let ctx = tokens! { "link" => Value::link("google.com") };
    assert_eq!(
        en("[link: messages]", &ctx),
        "<a href='google.com'>messages</a>"
    );
}

#[test]
fn test_undefined_decoration_passes_body_through() {
    assert_eq!(en("Hello [bold: World]", &Context::new()), "Hello World");
}

#[test]
fn test_decoration_body_is_evaluated() {
    let mut ctx = tokens! { "count" => 3 };
    ctx.set_decorator("bold", "<strong>{$0}</strong>");
    assert_eq!(
        en("[bold: {count || message}]", &ctx),
        "<strong>3 messages</strong>"
    );
}
