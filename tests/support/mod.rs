use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// One dataset, three layouts. Every builder below encodes the same
/// categories, species and section payloads.
pub fn legacy_object() -> Value {
    json!({
        "categories": {
            "등푸른생선": ["고등어", "꽁치"],
            "조개류": ["굴"]
        },
        "items": {
            "고등어": mackerel_fields(),
            "꽁치": saury_fields(),
            "굴": oyster_fields()
        }
    })
}

pub fn category_array() -> Value {
    json!({
        "categories": [
            {"name": "등푸른생선", "items": [
                {"name": "고등어", "sections": mackerel_fields()},
                {"name": "꽁치", "sections": saury_fields()}
            ]},
            {"name": "조개류", "items": [
                {"name": "굴", "sections": oyster_fields()}
            ]}
        ]
    })
}

pub fn bare_array() -> Value {
    json!([
        {"카테고리": "등푸른생선", "species": [
            with_name("고등어", mackerel_fields()),
            with_name("꽁치", saury_fields())
        ]},
        {"카테고리": "조개류", "species": [
            with_name("굴", oyster_fields())
        ]}
    ])
}

pub fn all_shapes() -> Vec<(&'static str, Value)> {
    vec![
        ("legacy_object", legacy_object()),
        ("category_array", category_array()),
        ("bare_array", bare_array()),
    ]
}

fn mackerel_fields() -> Value {
    json!({
        "개요": "가을에 기름이 오르는 등푸른생선",
        "주요영양소": ["단백질: 20.2g", "오메가3: 2.5g"],
        "약효및효용": ["혈관 건강", "뇌 기능"],
        "제철및선택법": "9~11월",
        "조리포인트": ["소금을 뿌려 둔다"],
        "어울리는요리": ["고등어조림"],
        "레시피": {
            "이름": "고등어조림",
            "재료": ["고등어", "무"],
            "만드는법": ["무를 깐다", "졸인다"]
        },
        "출처": ["«국가표준식품성분표»"],
        "보관법": "손질 후 냉장"
    })
}

fn saury_fields() -> Value {
    json!({
        "주요영양소": {"단백질": "19.6g", "지방": "14.1g"},
        "효능": "빈혈 예방",
        "레시피": {}
    })
}

fn oyster_fields() -> Value {
    json!({
        "nutrients": [{"key": "아연", "value": "13mg"}],
        "benefits": ["면역력"],
        "source": "본초강목"
    })
}

fn with_name(name: &str, fields: Value) -> Value {
    let mut fields = fields;
    if let Value::Object(map) = &mut fields {
        map.insert("이름".to_string(), Value::String(name.to_string()));
    }
    fields
}

pub fn catalog_normalize() -> Command {
    Command::new(env!("CARGO_BIN_EXE_catalog-normalize"))
}

pub fn fish_chat() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fish-chat"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run `cmd` with `input` on stdin and collect its output.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn {:?}", cmd))?;
    child
        .stdin
        .take()
        .context("child stdin unavailable")?
        .write_all(input.as_bytes())?;
    let output = child.wait_with_output()?;
    Ok(output)
}
