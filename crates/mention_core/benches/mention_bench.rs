use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use mention_core::{
    MentionConfig, MentionController, MentionKey, MentionOption, detect_trigger, filter_options,
};

const SMALL_CATALOG: usize = 64;
const LARGE_CATALOG: usize = 20_000;

fn make_catalog(n: usize) -> Vec<MentionOption> {
    (0..n)
        .map(|i| MentionOption::new(format!("user-{i}"), format!("User Number {i}")))
        .collect()
}

fn make_long_text(words: usize) -> String {
    let mut text = String::with_capacity(words * 16);
    for i in 0..words {
        if i % 7 == 0 {
            text.push_str("mail@example.com ");
        } else {
            text.push_str("lorem ipsum ");
        }
    }
    text.push_str("@user-12");
    text
}

fn bench_detect_trigger(c: &mut Criterion) {
    let text = make_long_text(2_000);
    c.bench_function("bench_detect_trigger_long_text", |b| {
        b.iter(|| black_box(detect_trigger(black_box(&text), text.len(), '@')));
    });
}

fn bench_filter_small(c: &mut Criterion) {
    let options = make_catalog(SMALL_CATALOG);
    c.bench_function("bench_filter_small", |b| {
        b.iter(|| black_box(filter_options(&options, &[], black_box("er 4")).len()));
    });
}

fn bench_filter_large(c: &mut Criterion) {
    let options = make_catalog(LARGE_CATALOG);
    let selected: Vec<String> = (0..500).map(|i| format!("user-{}", i * 7)).collect();
    c.bench_function("bench_filter_large", |b| {
        b.iter(|| black_box(filter_options(&options, &selected, black_box("number 19")).len()));
    });
}

fn bench_typing_session(c: &mut Criterion) {
    let options = make_catalog(LARGE_CATALOG);
    c.bench_function("bench_typing_session_large", |b| {
        b.iter_batched(
            || MentionController::new(MentionConfig::default(), options.clone()),
            |mut ctl| {
                let mut value = String::from("hey ");
                for ch in "@user-199".chars() {
                    value.push(ch);
                    let cursor = value.len();
                    ctl.handle_text_change(value.clone(), cursor);
                    ctl.handle_key_down(MentionKey::ArrowDown);
                }
                black_box(ctl.filtered_options().len())
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_detect_trigger,
    bench_filter_small,
    bench_filter_large,
    bench_typing_session
);
criterion_main!(benches);
