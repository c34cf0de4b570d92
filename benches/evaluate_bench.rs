use criterion::{criterion_group, criterion_main, Criterion};
use pdp_validator::{Evaluator, HtmlPage, ValidatorConfig};

const URL: &str = "https://www.samsung.com/pe/smartphones/galaxy-s24-ultra/buy/";

fn bench_evaluate(c: &mut Criterion) {
    let html = std::fs::read_to_string("tests/fixtures/pdp_galaxy_s24.html").expect("read fixture");
    let page = HtmlPage::parse(URL, &html).expect("parse page");
    let evaluator = Evaluator::new(ValidatorConfig::default()).expect("create evaluator");

    c.bench_function("evaluate_fixture_page", |b| {
        b.iter(|| evaluator.evaluate(&page).unwrap())
    });

    c.bench_function("parse_fixture_page", |b| {
        b.iter(|| HtmlPage::parse(URL, &html).unwrap())
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
