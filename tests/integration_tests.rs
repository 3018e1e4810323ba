//! Integration tests for mixtex segmentation, rendering and conversion

use mixtex::{
    latex_to_plain, plain_to_latex, reconstruct, render_mixed, render_mixed_with,
    split_latex_mixed, Delimiter, MathOptions, MathRenderer, MixedRenderer, PassthroughRenderer,
    RenderError, RenderMode, RenderOptions, RenderResult, Segment, SegmentKind,
};

// ============================================================================
// Segmentation
// ============================================================================

mod segmentation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_totality_on_mixed_inputs() {
        let inputs = [
            "Find $x$ if $$x^2 = 4$$ and \\(x > 0\\).",
            "Display \\[\\int_0^1 f\\] then text",
            "unbalanced $ dollar",
            "unbalanced \\[ bracket and $y$",
            "$$$$",
            "$$$",
            "\\\\(escaped?\\\\)",
            "multi\nline $a\nb$ text\n",
            "emoji 🎉 $\\alpha$ 🎉",
        ];
        for input in inputs {
            assert_eq!(reconstruct(&split_latex_mixed(input)), input);
        }
    }

    #[test]
    fn test_no_delimiters_single_text() {
        let segments = split_latex_mixed("plain text, no math");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Text);
        assert_eq!(segments[0].content, "plain text, no math");
    }

    #[test]
    fn test_single_inline_math() {
        assert_eq!(
            split_latex_mixed("Value is $x^2$ units"),
            vec![
                Segment::text("Value is "),
                Segment::math("x^2", Delimiter::Dollar),
                Segment::text(" units"),
            ]
        );
    }

    #[test]
    fn test_display_precedence() {
        let segments = split_latex_mixed("$$a+b$$");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "a+b");
        assert!(segments[0].display);
    }

    #[test]
    fn test_nearest_closer_policy() {
        assert_eq!(
            split_latex_mixed("cost is $5 and $10"),
            vec![
                Segment::text("cost is "),
                Segment::math("5 and ", Delimiter::Dollar),
                Segment::text("10"),
            ]
        );
    }

    #[test]
    fn test_four_dollars_is_empty_display() {
        assert_eq!(
            split_latex_mixed("$$$$"),
            vec![Segment::math("", Delimiter::DoubleDollar)]
        );
    }

    #[test]
    fn test_segments_serialize() {
        let json = serde_json::to_string(&split_latex_mixed("a $b$")).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"text","content":"a ","display":false},{"kind":"math","content":"b","display":false,"delimiter":"dollar"}]"#
        );
    }
}

// ============================================================================
// Rendering
// ============================================================================

mod rendering {
    use super::*;
    use pretty_assertions::assert_eq;

    struct AlwaysFails;

    impl MathRenderer for AlwaysFails {
        fn render_math(&self, _source: &str, _options: &MathOptions) -> RenderResult<String> {
            Err(RenderError::backend("unavailable"))
        }
    }

    struct Panics;

    impl MathRenderer for Panics {
        fn render_math(&self, _source: &str, _options: &MathOptions) -> RenderResult<String> {
            panic!("engine crashed")
        }
    }

    #[test]
    fn test_malformed_math_never_aborts() {
        let out = render_mixed(r"Before $\frac{1$ after $x$", RenderMode::Html);
        assert!(out.starts_with("Before "));
        assert!(out.contains(r#"class="math-error""#));
        assert!(out.contains(r"\frac{1"));
        assert!(out.contains(" after "));
        // The valid segment still renders.
        assert!(out.contains("<math"));
    }

    #[test]
    fn test_mathml_mode_has_no_html_wrapper() {
        let out = render_mixed("$x$", RenderMode::Mathml);
        assert!(out.starts_with("<math"));
        assert!(!out.contains("math-inline"));
    }

    #[test]
    fn test_text_only_escaping() {
        assert_eq!(
            render_mixed("Tom & \"Jerry\" <3\n'ok'", RenderMode::Html),
            "Tom &amp; &quot;Jerry&quot; &lt;3<br/>&#39;ok&#39;"
        );
    }

    #[test]
    fn test_every_math_segment_falls_back() {
        let report = render_mixed_with("$a$ | $b<c$", AlwaysFails, &RenderOptions::default());
        assert_eq!(report.failures.len(), 2);
        assert_eq!(
            report.output,
            concat!(
                r#"<span class="math-error" title="Backend error: unavailable">a</span>"#,
                " | ",
                r#"<span class="math-error" title="Backend error: unavailable">b&lt;c</span>"#
            )
        );
    }

    #[test]
    fn test_panicking_backend_falls_back() {
        let report = render_mixed_with("a $x<y$ b", Panics, &RenderOptions::mathml());
        assert!(report.has_failures());
        assert!(matches!(report.failures[0].error, RenderError::Panicked { .. }));
        assert!(report.format_failures()[0].contains("engine crashed"));
        assert_eq!(
            report.output,
            r#"a <span class="math-error" title="Renderer panicked: engine crashed">x&lt;y</span> b"#
        );
    }

    #[test]
    fn test_pulldown_escapes_comparison_operators() {
        let out = render_mixed("$a<b$ and $c>d$", RenderMode::Mathml);
        assert!(out.contains("&lt;"));
        assert!(out.contains("&gt;"));
        assert!(!out.contains("<mo><</mo>"));
        assert!(!out.contains("<mo>></mo>"));
    }

    #[test]
    fn test_pulldown_text_group_cannot_inject_markup() {
        for mode in [RenderMode::Html, RenderMode::Mathml] {
            let out = render_mixed(r"$\text{<img src=x onerror=alert(1)>}$", mode);
            assert!(!out.contains("<img"), "{}", out);
            assert!(out.contains("&lt;img"), "{}", out);
        }
    }

    #[test]
    fn test_deterministic_output() {
        let renderer = MixedRenderer::new();
        let text = "Solve $x^2 - 1 = 0$:\n\\[x = \\pm 1\\]";
        assert_eq!(renderer.render(text), renderer.render(text));
    }

    #[test]
    fn test_passthrough_for_client_side_typesetting() {
        let renderer = MixedRenderer::with_backend(PassthroughRenderer, RenderOptions::html());
        assert_eq!(
            renderer.render("Let $a<b$.\n$$c$$"),
            concat!(
                r#"Let <span class="math inline">\(a&lt;b\)</span>.<br/>"#,
                r#"<div class="math display">\[c\]</div>"#
            )
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_mixed("", RenderMode::Html), "");
    }
}

// ============================================================================
// Plain ⇄ LaTeX
// ============================================================================

mod conversion {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fraction() {
        assert_eq!(plain_to_latex("(1/2)"), r"$\frac{1}{2}$");
    }

    #[test]
    fn test_derivative() {
        let out = plain_to_latex("d/dx sin(x)");
        assert!(out.contains(r"\frac{d}{dx}"));
        assert!(out.starts_with('$') && out.ends_with('$'));
        assert_eq!(out, r"$\frac{d}{dx} sin(x)$");
    }

    #[test]
    fn test_exponent_bracing() {
        assert_eq!(plain_to_latex("x^2"), "$x^2$");
        assert_eq!(plain_to_latex("x^10"), "$x^{10}$");
    }

    #[test]
    fn test_round_trip_fixture() {
        let plain = latex_to_plain("$\\frac{1}{2}$");
        assert_eq!(plain, "(1/2)");
        assert_eq!(plain_to_latex(&plain), "$\\frac{1}{2}$");
    }

    #[test]
    fn test_greek_substitution_and_wrap_triggers() {
        assert_eq!(plain_to_latex("theta plus pi"), r"$\theta plus \pi$");
        // \theta is not in the wrap trigger list.
        assert_eq!(plain_to_latex("theta plus phi"), r"\theta plus phi");
        assert_eq!(plain_to_latex("alpha"), r"$\alpha$");
        assert_eq!(plain_to_latex("lambda sigma"), r"\lambda \sigma");
    }

    #[test]
    fn test_integral() {
        assert_eq!(plain_to_latex("int x dx"), r"$\int x dx$");
        assert_eq!(latex_to_plain(r"$\int x \cdot y$"), "int x * y");
    }

    #[test]
    fn test_round_trip_is_not_identity() {
        // \left/\right are dropped together with their parentheses.
        let original = r"$\left(\frac{a}{b}\right)$";
        let plain = latex_to_plain(original);
        assert_eq!(plain, "(a/b)");
        assert_eq!(plain_to_latex(&plain), r"$\frac{a}{b}$");
        assert_ne!(plain_to_latex(&plain), original);
    }

    #[test]
    fn test_edit_then_render() {
        let latex = plain_to_latex("sqrt(2) * pi");
        assert_eq!(latex, r"$\sqrt{2} * \pi$");
        let html = render_mixed(&latex, RenderMode::Mathml);
        assert!(html.starts_with("<math"));
        assert!(!html.contains("math-error"));
    }
}
