use docline_extract::record::{Limits, assemble};
use docline_extract::{infer_metadata, sanitize};

fn synthetic_first_page(body_lines: usize) -> String {
    let mut page = String::from(
        "www.ssoar.info\nVolume 12, No. 3\nMigration and Labour Markets in Europe\nJane Doe, John Smith and Ada Lovelace\nPublished 2019\n\nAbstract: ",
    );
    for i in 0..body_lines {
        page.push_str(&format!("Sentence {i} of the abstract continues here.\n"));
    }
    page.push_str("\n1 Introduction\n");
    page
}

#[divan::bench(args = [10, 100, 1000])]
fn infer(bencher: divan::Bencher, body_lines: usize) {
    let page = synthetic_first_page(body_lines);
    bencher.bench(|| infer_metadata(divan::black_box(&page), 4));
}

#[divan::bench(args = [10_000, 100_000])]
fn sanitize_full_text(bencher: divan::Bencher, chars: usize) {
    let text: String = "body\ttext\n".chars().cycle().take(chars).collect();
    bencher.bench(|| sanitize(divan::black_box(&text)));
}

#[divan::bench]
fn assemble_record(bencher: divan::Bencher) {
    let page = synthetic_first_page(50);
    let full = page.repeat(20);
    let limits = Limits::default();
    bencher.bench(|| assemble("bench".into(), String::new(), &full, &page, &limits));
}

fn main() {
    divan::main();
}
