use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazy_static::lazy_static;
use nerode::dfa::Dfa;
use nerode::parser;
use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::TestRunner;
use regex::Regex as LibRegex;

const COMPILE_PATTERN: &str = "(0|(1(01*(00)*0)*1)*)*";
const CHECK_PATTERN: &str = "((a|b)(c|d))*|(ab)+c?";

lazy_static! {
    static ref PIPELINE_DFA: Dfa = parser::regex(COMPILE_PATTERN)
        .unwrap()
        .to_nfa()
        .to_dfa();
    static ref MINIMAL: Dfa = parser::regex(CHECK_PATTERN)
        .unwrap()
        .to_nfa()
        .to_dfa()
        .minimize();
}

pub fn regex_compile(c: &mut Criterion) {
    c.bench_function("nerode regex compile", |b| {
        b.iter(|| {
            let input = black_box(COMPILE_PATTERN);
            let regex = parser::regex(input).unwrap();
            let nfa = regex.to_nfa();
            nfa.to_dfa()
        })
    });

    c.bench_function("library regex compile", |b| {
        b.iter(|| {
            let input = black_box(COMPILE_PATTERN);
            LibRegex::new(input).unwrap()
        })
    });
}

pub fn minimization(c: &mut Criterion) {
    c.bench_function("minimize", |b| b.iter(|| black_box(&*PIPELINE_DFA).minimize()));
}

pub fn regex_check(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let string_gen = "[a-d]{0,32}".new_tree(&mut runner).unwrap();

    c.bench_function("nerode regex check", |b| {
        b.iter(|| MINIMAL.accepts(black_box(&string_gen.current())))
    });

    let mut runner = TestRunner::default();
    let string_gen = "[a-d]{0,32}".new_tree(&mut runner).unwrap();
    let input_regex = format!("^({CHECK_PATTERN})$");
    let regex = LibRegex::new(&input_regex).unwrap();
    c.bench_function("library regex check", |b| {
        b.iter(|| regex.is_match(black_box(&string_gen.current())))
    });
}

criterion_group!(benches, regex_compile, minimization, regex_check);
criterion_main!(benches);
