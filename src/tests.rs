use crate::config::{self, Config};
use crate::markup5ever_rcdom::Handle;
use crate::render::text_renderer::TextDecorator;
use crate::{from_read, parse, Error};

/// Like assert_eq!(), but prints out the results normally as well
macro_rules! assert_eq_str {
    ($a:expr, $b:expr) => {{
        let (a, b) = (&$a, &$b);
        if a != b {
            println!("<<<\n{}===\n{}>>>", a, b);
            assert_eq!(a, b);
        }
    }};
}
#[track_caller]
fn test_html(input: &[u8], expected: &str) {
    let output = from_read(input).unwrap();
    assert_eq_str!(output, expected);
}
#[track_caller]
fn test_html_conf<D: TextDecorator>(conf: Config<D>, input: &[u8], expected: &str) {
    let output = conf.string_from_read(input).unwrap();
    assert_eq_str!(output, expected);
}
#[track_caller]
fn test_html_err<D: TextDecorator>(conf: Config<D>, input: &[u8], expected: Error) {
    let result = conf.string_from_read(input);
    match result {
        Err(e) => assert_eq!(e, expected),
        Ok(text) => panic!("Expected error, got: [[{}]]", text),
    }
}

/// Find the first element called `tag`, in document order.
fn find_element(root: &Handle, tag: &str) -> Handle {
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if node.element_name() == Some(tag) {
            return node;
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    panic!("no <{}> element", tag);
}

/// Render just the subtree rooted at the first `tag` element.
#[track_caller]
fn test_element_conf<D: TextDecorator>(conf: Config<D>, input: &[u8], tag: &str, expected: &str) {
    let dom = parse(input).unwrap();
    let node = find_element(&dom.document, tag);
    let parent = node.parent().unwrap();
    let mut out = Vec::new();
    conf.render_node(&mut out, &node, &parent).unwrap();
    let output = String::from_utf8(out).unwrap();
    assert_eq_str!(output, expected);
}

#[test]
fn test_heading() {
    test_html(b"<h1>Hi</h1>", "\n# Hi\n");
}

#[test]
fn test_heading_levels() {
    test_html(b"<h2>Two</h2>", "\n## Two\n");
    test_html(b"<h3>Three</h3>", "\n### Three\n");
    test_html(b"<h4>Four</h4>", "\n#### Four\n");
    test_html(b"<h5>Five</h5>", "\n##### Five\n");
}

#[test]
fn test_h6_not_special() {
    test_html(b"<h6>Six</h6>", "Six");
}

#[test]
fn test_para() {
    test_html(b"<p>a   b</p>", "\na b\n");
}

#[test]
fn test_paras() {
    test_html(
        b"<p>First</p>
          <p>Second</p>",
        "\nFirst\n\nSecond\n",
    );
}

#[test]
fn test_whitespace_collapsed() {
    test_html(b"<p>  lots\n\tof \r\n  space  </p>", "\n lots of space \n");
}

#[test]
fn test_sibling_text_not_collapsed() {
    // Each text node is collapsed on its own; the space before the <b>
    // and the one inside it both survive.
    test_html(b"<p>a <b> b</b></p>", "\na * b*\n");
}

#[test]
fn test_nbsp_kept() {
    test_html(b"<p>a&nbsp;&nbsp;b</p>", "\na\u{a0}\u{a0}b\n");
}

#[test]
fn test_entities() {
    test_html(b"<p>fish &amp; chips &lt;3</p>", "\nfish & chips <3\n");
}

#[test]
fn test_link() {
    test_html(br#"<a href="https://x.test">link</a>"#, "link (https://x.test)");
}

#[test]
fn test_link_rel() {
    test_html(br#"<a href="https://x.test" rel="nofollow">link</a>"#, "link");
    test_html(br#"<a href="style.css" rel="stylesheet">css</a>"#, "css");
}

#[test]
fn test_link_no_href() {
    test_html(b"<a>anchor</a>", "anchor");
    test_html(br#"<a href="">empty</a>"#, "empty");
    test_html(br#"<a name="top">named</a>"#, "named");
}

#[test]
fn test_link_in_para() {
    test_html(
        br#"<p>See <a href="https://x.test/a">this   page</a> now.</p>"#,
        "\nSee this page (https://x.test/a) now.\n",
    );
}

#[test]
fn test_link_first_href_wins() {
    test_html(br#"<a href="one" href="two">x</a>"#, "x (one)");
}

#[test]
fn test_image() {
    test_html(br#"<img alt="cat"/>"#, "(image: cat) ");
}

#[test]
fn test_image_no_alt() {
    test_html(br#"<img src="cat.png">"#, "(image) ");
    test_html(br#"<img src="cat.png" alt="">"#, "(image) ");
}

#[test]
fn test_image_in_link() {
    test_html(
        br#"<a href="/big.png"><img src="small.png" alt="thumb"></a>"#,
        "(image: thumb)  (/big.png)",
    );
}

#[test]
fn test_pre() {
    test_html(b"<pre>  a\n  b</pre>", "\n```\n  a\n  b\n```\n");
}

#[test]
fn test_pre_leading_newline() {
    // The parser drops a newline straight after <pre>.
    test_html(b"<pre>\nx  y</pre>", "\n```\nx  y\n```\n");
}

#[test]
fn test_pre_nested_code() {
    test_html(
        b"<pre><code>fn main() {\n    go();\n}</code></pre>",
        "\n```\n`fn main() {\n    go();\n}`\n```\n",
    );
}

#[test]
fn test_pre_deep_ancestor() {
    test_html(
        b"<pre><span><b>a   b</b></span></pre>",
        "\n```\n*a   b*\n```\n",
    );
}

#[test]
fn test_ignored_script() {
    test_html(b"<script>ignored</script><p>kept</p>", "\nkept\n");
}

#[test]
fn test_ignored_in_body() {
    test_html(
        b"<p>a<script>var x = '<b>no</b>';</script>b</p>",
        "\nab\n",
    );
    test_html(b"<p>a<style>p { color: red }</style>b</p>", "\nab\n");
}

#[test]
fn test_ignored_head() {
    test_html(
        b"<html><head><title>Title</title><meta charset=utf-8><style>h1{}</style></head>
          <body><p>Body</p></body></html>",
        "\nBody\n",
    );
}

#[test]
fn test_ignored_descendants() {
    // A <title> in an SVG in the body is still ignored, with its children.
    test_html(
        b"<p>x<svg><title>hidden <span>too</span></title></svg>y</p>",
        "\nxy\n",
    );
}

#[test]
fn test_body_text_dropped() {
    test_html(b"loose <b>bold</b> text", "*bold*");
}

#[test]
fn test_emphasis() {
    test_html(b"<p><i>i</i> <cite>c</cite> <b>b</b> <em>e</em></p>", "\n_i_ _c_ *b* *e*\n");
}

#[test]
fn test_code() {
    test_html(b"<p><code>x = 1</code> or <tt>y</tt></p>", "\n`x = 1` or `y`\n");
}

#[test]
fn test_br() {
    test_html(b"<p>one<br>two</p>", "\none\ntwo\n");
}

#[test]
fn test_hr() {
    test_html(b"<p>a</p><hr><p>b</p>", "\na\n\n------\n\n\nb\n");
}

#[test]
fn test_figcaption() {
    test_html(
        br#"<figure><img alt="pic"><figcaption>A picture</figcaption></figure>"#,
        "(image: pic) \n[A picture]\n",
    );
}

#[test]
fn test_header_footer_nav() {
    test_html(b"<header>Top</header>", "\nTop\n");
    test_html(b"<nav>Menu</nav>", "\nMenu\n");
    test_html(b"<footer>End</footer>", "\nEnd\n");
}

#[test]
fn test_comments_ignored() {
    test_html(b"<p>a<!-- comment -->b</p>", "\nab\n");
}

#[test]
fn test_unknown_elements_transparent() {
    test_html(b"<div><span>in</span><blink>side</blink></div>", "inside");
}

#[test]
fn test_empty_document() {
    test_html(b"", "");
}

#[test]
fn test_idempotent() {
    let dom = parse(&br#"<h1>T</h1><p>a <a href="u">b</a> <img alt="c"></p><pre> x </pre>"#[..]).unwrap();
    let conf = config::plain();
    let mut first = Vec::new();
    let mut second = Vec::new();
    conf.render_dom(&mut first, &dom).unwrap();
    conf.render_dom(&mut second, &dom).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_literal() {
    test_html_conf(
        config::trivial(),
        br#"<h2>T</h2><p><b>bold</b> <i>it</i> <code>c</code> <a href="u">l</a></p>"#,
        "\nT\n\nbold it c l (u)\n",
    );
}

#[test]
fn test_literal_keeps_fixed_text() {
    test_html_conf(
        config::trivial(),
        b"<figcaption>cap</figcaption><pre>p</pre>",
        "\n[cap]\n\n```\np\n```\n",
    );
}

#[test]
fn test_render_subtree() {
    test_element_conf(config::plain(), b"<p>x <b>y   z</b></p>", "b", "*y z*");
}

#[test]
fn test_render_subtree_in_pre() {
    // The <pre> ancestor is found by walking the parent links, even when
    // rendering starts below it.
    test_element_conf(config::plain(), b"<pre><i>a   b</i></pre>", "i", "_a   b_");
}

#[test]
fn test_render_root_as_own_parent() {
    // Starting from an element with itself as parent: the element's own
    // text children still render.
    let dom = parse(&b"<p>a  b</p>"[..]).unwrap();
    let p = find_element(&dom.document, "p");
    let mut out = Vec::new();
    config::plain().render_node(&mut out, &p, &p).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "\na b\n");
}

#[cfg(unix)]
mod colour {
    use super::test_element_conf;
    use crate::{config, from_read_coloured};
    use termion::color::{self, Bg, Fg};
    use termion::style;

    fn reset() -> String {
        style::Reset.to_string()
    }

    #[test]
    fn test_colour_heading() {
        let r = reset();
        let expected = format!(
            "{r}\n{}{}{}Hi{r}\n{r}{r}{r}{r}",
            Bg(color::Blue),
            Fg(color::White),
            style::Bold,
            r = r
        );
        // The empty <head> is reset too, before the body.
        assert_eq_str!(from_read_coloured(&b"<h1>Hi</h1>"[..]).unwrap(), expected);
    }

    #[test]
    fn test_colour_bold() {
        let r = reset();
        test_element_conf(
            config::coloured(),
            b"<b>x</b>",
            "b",
            &format!("\x1b[1mx{r}{r}{r}", r = r),
        );
    }

    #[test]
    fn test_colour_link() {
        let r = reset();
        test_element_conf(
            config::coloured(),
            br#"<a href="u">x</a>"#,
            "a",
            &format!("\x1b[4mx{r}{r} (u){r}", r = r),
        );
        test_element_conf(
            config::coloured(),
            br#"<a href="u" rel="me">x</a>"#,
            "a",
            &format!("\x1b[4mx{r}{r}", r = r),
        );
    }

    #[test]
    fn test_colour_code_and_italic() {
        let r = reset();
        test_element_conf(
            config::coloured(),
            b"<code>c</code>",
            "code",
            &format!("{}{}c{r}{r}{r}", Bg(color::LightWhite), Fg(color::Red), r = r),
        );
        test_element_conf(
            config::coloured(),
            b"<cite>c</cite>",
            "cite",
            &format!("\x1b[4mc{r}{r}{r}", r = r),
        );
    }

    #[test]
    fn test_colour_nesting_limitation() {
        // Every close marker is a full reset, so after the inner <i> ends the
        // rest of the <b> is no longer bold.
        let r = reset();
        test_element_conf(
            config::coloured(),
            b"<b><i>x</i>y</b>",
            "b",
            &format!("\x1b[1m\x1b[4mx{r}{r}{r}y{r}{r}{r}", r = r),
        );
    }

    #[test]
    fn test_colour_nodes_without_style_reset() {
        let r = reset();
        test_element_conf(
            config::coloured(),
            b"<span>x</span>",
            "span",
            &format!("x{r}{r}", r = r),
        );
    }
}

#[test]
fn test_max_depth() {
    let html = "<div>".repeat(100) + "deep";
    test_html_err(config::plain().max_depth(50), html.as_bytes(), Error::TooDeep(50));
    let output = config::plain().max_depth(500).string_from_read(html.as_bytes()).unwrap();
    assert_eq!(output, "deep");
}

#[test]
fn test_max_depth_counts_from_start() {
    // document > html > body > p > text is four levels below the document.
    test_html_conf(config::plain().max_depth(4), b"<p>x</p>", "\nx\n");
    test_html_err(config::plain().max_depth(3), b"<p>x</p>", Error::TooDeep(3));
}

#[test]
fn test_max_depth_skips_ignored() {
    // The <script> is below the limit, but ignored elements are never
    // entered so it doesn't count.
    test_html_conf(
        config::plain().max_depth(4),
        b"<p>x</p><div><div><script>s</script></div></div>",
        "\nx\n",
    );
}

#[test]
fn test_deep_document() {
    // Deeper than would be comfortable with a recursive walk.
    let html = "<span>".repeat(5000) + "x";
    test_html(html.as_bytes(), "x");
}

#[test]
fn test_deep_document_linear() {
    // Rendering mustn't revisit every ancestor for each text node.
    let html = "<span>x".repeat(20_000);
    let dom = parse(html.as_bytes()).unwrap();
    let start = std::time::Instant::now();
    let mut out = Vec::new();
    config::plain().render_dom(&mut out, &dom).unwrap();
    let elapsed = start.elapsed();
    assert_eq!(out.len(), 20_000);
    assert!(elapsed < std::time::Duration::from_secs(2), "took {:?}", elapsed);
}

#[test]
fn test_deep_pre() {
    let html = "<pre>".to_string() + &"<span>a  b".repeat(1000);
    let output = from_read(html.as_bytes()).unwrap();
    assert_eq!(output, format!("\n```\n{}\n```\n", "a  b".repeat(1000)));
}

#[test]
fn test_read_error() {
    struct FailingReader;
    impl std::io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "broken"))
        }
    }
    let err = from_read(FailingReader).unwrap_err();
    assert_eq!(err, Error::ReadError(std::io::ErrorKind::Other.into()));
}

#[test]
fn test_write_error() {
    struct FailingWriter;
    impl std::io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
    let err = config::plain()
        .write_from_read(&b"<p>x</p>"[..], FailingWriter)
        .unwrap_err();
    assert_eq!(err, Error::IoError(std::io::ErrorKind::BrokenPipe.into()));
}

#[test]
fn test_custom_decorator() {
    struct Tags;
    impl TextDecorator for Tags {
        fn decorate_header_start(&self, level: usize) -> String {
            format!("<H{}>", level)
        }
        fn decorate_italic_start(&self) -> String {
            "<I>".into()
        }
        fn decorate_italic_end(&self) -> String {
            "</I>".into()
        }
        fn decorate_bold_start(&self) -> String {
            "<B>".into()
        }
        fn decorate_bold_end(&self) -> String {
            "</B>".into()
        }
        fn decorate_code_start(&self) -> String {
            "<C>".into()
        }
        fn decorate_code_end(&self) -> String {
            "</C>".into()
        }
        fn decorate_link_start(&self) -> String {
            "<L>".into()
        }
        fn decorate_link_end(&self) -> String {
            "</L>".into()
        }
    }
    test_html_conf(
        config::with_decorator(Tags),
        br#"<h3>T</h3><p><a href="u"><b>x</b></a> <a>y</a></p>"#,
        "\n<H3>T\n\n<L><B>x</B></L> (u) <L>y\n",
    );
}
