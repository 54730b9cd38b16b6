use super::*;

fn name(n: &str) -> TypeSpec {
    TypeSpec::name(n)
}

#[test]
fn parse_qualified_name() {
    assert_eq!(parse_type("foo").unwrap(), name("foo"));
    assert_eq!(parse_type("foo::bar").unwrap(), name("foo::bar"));
    assert_eq!(parse_type(" std :: string ").unwrap(), name("std::string"));
}

#[test]
fn parse_template_instance() {
    let ty = parse_type("foo::bar<baz, qux::fred>").unwrap();
    match ty {
        TypeSpec::Template { name: n, args } => {
            assert_eq!(n, "foo::bar");
            assert_eq!(args, vec![name("baz"), name("qux::fred")]);
        }
        _ => panic!("expected template instance"),
    }
}

#[test]
fn parse_nested_templates() {
    let ty = parse_type("std::vector<std::pair<int, Obj>>").unwrap();
    assert_eq!(
        ty,
        TypeSpec::template(
            "std::vector",
            vec![TypeSpec::template("std::pair", vec![name("int"), name("Obj")])]
        )
    );
}

#[test]
fn parse_function_defaults_to_void() {
    let ty = parse_type("(n: int)").unwrap();
    match ty {
        TypeSpec::Function(func) => {
            assert_eq!(func.args, vec![ArgSpec::new("n", name("int"))]);
            assert_eq!(*func.ret, name("void"));
            assert!(!func.is_const);
            assert!(!func.is_noexcept);
            assert!(!func.is_off_thread);
        }
        _ => panic!("expected function"),
    }
}

#[test]
fn parse_empty_function() {
    let func = parse_type("()").unwrap().into_function().unwrap();
    assert!(func.args.is_empty());
    assert!(func.ret.is_name("void"));
}

#[test]
fn parse_modifier_chain() {
    let ty = parse_type("foo const*&&").unwrap();
    assert_eq!(
        ty,
        TypeSpec::modified(
            ModifierKind::RRef,
            TypeSpec::modified(
                ModifierKind::Pointer,
                TypeSpec::modified(ModifierKind::Const, name("foo"))
            )
        )
    );
}

#[test]
fn parse_leading_const_wraps_core_first() {
    let ty = parse_type("const std::string&").unwrap();
    assert_eq!(
        ty,
        TypeSpec::modified(
            ModifierKind::Ref,
            TypeSpec::modified(ModifierKind::Const, name("std::string"))
        )
    );

    let ty = parse_type("const char* const").unwrap();
    assert_eq!(
        ty,
        TypeSpec::modified(
            ModifierKind::Const,
            TypeSpec::modified(
                ModifierKind::Pointer,
                TypeSpec::modified(ModifierKind::Const, name("char"))
            )
        )
    );
}

#[test]
fn parse_const_noexcept_function() {
    let func = parse_type("() const noexcept -> void")
        .unwrap()
        .into_function()
        .unwrap();
    assert!(func.args.is_empty());
    assert!(func.is_const);
    assert!(func.is_noexcept);
    assert!(!func.is_off_thread);
    assert!(func.ret.is_name("void"));
}

#[test]
fn parse_off_thread_modifier() {
    let func = parse_type("(path: std::string) off_thread -> bool")
        .unwrap()
        .into_function()
        .unwrap();
    assert!(func.is_off_thread);
    assert!(func.ret.is_name("bool"));
}

#[test]
fn parse_callback_argument() {
    let func = parse_type("(amount: int64_t, cb: AsyncCallback<(err: Optional<AppError>)>&&)")
        .unwrap()
        .into_function()
        .unwrap();
    assert_eq!(func.args.len(), 2);
    assert_eq!(func.args[1].name, "cb");
    match &func.args[1].ty {
        TypeSpec::Modified {
            kind: ModifierKind::RRef,
            inner,
        } => match inner.as_ref() {
            TypeSpec::Template { name: n, args } => {
                assert_eq!(n, "AsyncCallback");
                let cb = args[0].as_function().unwrap();
                assert_eq!(cb.args[0].name, "err");
            }
            _ => panic!("expected callback template"),
        },
        _ => panic!("expected rvalue reference"),
    }
}

#[test]
fn parse_function_returning_function() {
    let func = parse_type("() -> (x: int) -> bool")
        .unwrap()
        .into_function()
        .unwrap();
    let inner = func.ret.as_function().unwrap();
    assert_eq!(inner.args[0].name, "x");
    assert!(inner.ret.is_name("bool"));
}

#[test]
fn parse_accepts_trailing_commas() {
    let func = parse_type("(a: int, b: bool,)").unwrap().into_function().unwrap();
    assert_eq!(func.args.len(), 2);
    let ty = parse_type("std::map<K, V,>").unwrap();
    assert_eq!(
        ty,
        TypeSpec::template("std::map", vec![name("K"), name("V")])
    );
}

#[test]
fn parse_error_duplicate_modifier() {
    let err = parse_type("() const const").unwrap_err();
    assert!(matches!(
        err.error,
        ParserError::DuplicateModifier { ref modifier, .. } if modifier == "const"
    ));
    assert_eq!(err.span, Span::new(9, 14));
}

#[test]
fn parse_error_unknown_modifier() {
    let err = parse_type("() volatile").unwrap_err();
    assert!(matches!(
        err.error,
        ParserError::UnknownModifier { ref modifier, .. } if modifier == "volatile"
    ));
}

#[test]
fn parse_error_modifier_after_reference() {
    for text in ["foo& const", "foo&*", "foo&& &"] {
        let err = parse_type(text).unwrap_err();
        assert!(
            matches!(err.error, ParserError::ModifierAfterReference { .. }),
            "{text}: {err}"
        );
    }
}

#[test]
fn parse_error_function_cannot_be_modified() {
    let err = parse_type("const (a: int)").unwrap_err();
    assert!(matches!(err.error, ParserError::ExpectedType { .. }));
}

#[test]
fn parse_error_trailing_input() {
    let err = parse_type("foo bar").unwrap_err();
    assert!(matches!(
        err.error,
        ParserError::TrailingInput { ref found, .. } if found == "bar"
    ));
}

#[test]
fn parse_error_renders_caret_under_token() {
    let err = parse_type("foo<bar, ->").unwrap_err();
    assert!(!err.at_end);
    assert_eq!(
        err.to_string(),
        "expected a type, found '->'\nfoo<bar, ->\n         ^^"
    );
}

#[test]
fn parse_error_renders_at_end() {
    let err = parse_type("(a: int").unwrap_err();
    assert!(err.at_end);
    assert_eq!(
        err.to_string(),
        "expected ')' to close the argument list, found 'end of input'\n(a: int\nAT END"
    );
}

#[test]
fn parse_error_empty_input_is_at_end() {
    let err = parse_type("").unwrap_err();
    assert!(err.at_end);
    assert!(matches!(err.error, ParserError::ExpectedType { .. }));
}

#[test]
fn parse_error_lexical() {
    let err = parse_type("foo<$>").unwrap_err();
    assert!(matches!(
        err.error,
        ParserError::Lexer(LexerError::UnexpectedCharacter { ch: '$', .. })
    ));
    assert_eq!(err.message(), "unexpected character '$'");
    assert_eq!(err.render_context(), "foo<$>\n    ^");
}

#[test]
fn parse_error_exposes_source_to_miette() {
    let err = parse_type("a<>").unwrap_err();
    assert!(err.source_code().is_some());
    assert_eq!(err.code().unwrap().to_string(), "E1002");
    let labels: Vec<_> = err.labels().unwrap().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 2);
}

#[test]
fn parse_is_pure() {
    let text = "(a: std::vector<Obj const*>, b: Mixed&&) const -> Results";
    assert_eq!(parse_type(text).unwrap(), parse_type(text).unwrap());
}
