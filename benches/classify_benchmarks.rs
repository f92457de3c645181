use criterion::{Criterion, black_box, criterion_group, criterion_main};

use wordahead::engine::classify::classify;
use wordahead::engine::level::CefrLevel;
use wordahead::engine::normalize::normalize_word;
use wordahead::engine::profile::{LearnerProfile, ReviewEntry};
use wordahead::engine::token::Token;

fn make_tokens(count: usize) -> Vec<Token> {
    let words = [
        "the",
        "lighthouse",
        "keeper",
        "accustomed",
        "solitude.",
        "treacherous,",
        "storm",
        "waves",
        "\"beacon\"",
        "shore!",
    ];
    let levels = CefrLevel::all();
    (0..count)
        .map(|i| {
            if i % 17 == 0 {
                Token {
                    text: "\n".to_string(),
                    cefr: None,
                    importance: -1,
                    is_difficult: false,
                }
            } else {
                Token {
                    text: words[i % words.len()].to_string(),
                    cefr: Some(levels[i % levels.len()]),
                    importance: (i % 5) as i8,
                    is_difficult: i % 6 == 0,
                }
            }
        })
        .collect()
}

fn make_profile(learned: usize, queued: usize) -> LearnerProfile {
    let mut profile = LearnerProfile::default();
    for i in 0..learned {
        profile.mark_learned(&format!("learned{i}"));
    }
    for i in 0..queued {
        profile.add_to_review(
            &format!("queued{i}"),
            ReviewEntry::new(Some(CefrLevel::B2), None),
        );
    }
    profile
}

fn bench_classify_stream(c: &mut Criterion) {
    let tokens = make_tokens(5_000);
    let profile = make_profile(500, 200);

    c.bench_function("classify (5K tokens, 500-word profile)", |b| {
        b.iter(|| {
            tokens
                .iter()
                .filter_map(|t| classify(black_box(t), black_box(&profile)))
                .count()
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    let words = [
        "Treacherous.",
        "\"lighthouse\"",
        "solitude,",
        "café!",
        "Cafe\u{301}?",
        "plain",
    ];

    c.bench_function("normalize_word (mixed punctuation and accents)", |b| {
        b.iter(|| {
            for word in &words {
                black_box(normalize_word(black_box(word)));
            }
        })
    });
}

fn bench_token_parse(c: &mut Criterion) {
    let tokens = make_tokens(2_000);
    let json = serde_json::to_string(&tokens).unwrap();

    c.bench_function("token stream parse (2K tokens)", |b| {
        b.iter(|| serde_json::from_str::<Vec<Token>>(black_box(&json)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_classify_stream,
    bench_normalize,
    bench_token_parse,
);
criterion_main!(benches);
