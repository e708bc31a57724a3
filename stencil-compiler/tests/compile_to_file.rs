use std::fs::{self, File};
use std::io::BufWriter;

use serde_json::json;
use stencil_compiler::{ArtifactDocument, Compiler, TeraCompiler, ARTIFACT_FORMAT};
use stencil_core::{ArtifactId, RenderContext, TemplateName};
use tempfile::TempDir;

const WELCOME: &str = "\
<h1>Welcome, {{ user.name }}</h1>
{% if user.admin %}<p>admin</p>{% endif %}
";

#[test]
fn file_sink_receives_a_loadable_artifact() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("welcome.cache");
    let compiler = TeraCompiler::new();
    let name = TemplateName::from("mail/welcome.html");

    {
        let file = File::create(&path).expect("create artifact");
        let mut sink = BufWriter::new(file);
        compiler.compile(&name, WELCOME, &mut sink).expect("compile");
    }

    let bytes = fs::read(&path).expect("read artifact");
    let doc = ArtifactDocument::parse("check", &bytes).expect("parse document");
    assert_eq!(doc.format, ARTIFACT_FORMAT);
    assert_eq!(doc.name, name);
    assert!(doc.autoescape);

    let unit = compiler
        .load(&ArtifactId::from("0123abcd"), &bytes)
        .expect("load");
    let mut ctx = RenderContext::new();
    ctx.insert("user".to_string(), json!({ "name": "Ada & co", "admin": true }));
    let mut out = Vec::new();
    unit.render(&ctx, &mut out).expect("render");
    let text = String::from_utf8(out).expect("utf8");

    assert!(text.contains("<h1>Welcome, Ada &amp; co</h1>"), "got: {text}");
    assert!(text.contains("<p>admin</p>"));
}

#[test]
fn in_memory_compile_matches_file_compile_body() {
    let compiler = TeraCompiler::new();
    let name = TemplateName::from("x.txt");
    let code = compiler.compile_to_string(&name, "{{ a }}-{{ b }}").expect("compile");

    let doc = ArtifactDocument::parse("check", code.as_bytes()).expect("parse");
    assert_eq!(doc.body, "{{ a }}-{{ b }}");
    assert!(!doc.autoescape);
}
