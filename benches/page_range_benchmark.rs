//! Page-range and pagination-bar layout benchmarks.
//!
//! The pagination bar is recomputed on every frame, so both the pure range
//! and the control placement should stay well under a microsecond.
//!
//! Run with: cargo bench

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use postboard::model::PageNumber;
use postboard::state::{page_range, Pagination};
use postboard::view::pagination_bar::place_controls;
use ratatui::layout::Rect;

fn bench_page_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_range");
    for (current, total) in [(3, 7), (4, 100), (50, 100), (98, 100), (500_000, 1_000_000)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{current}_of_{total}")),
            &(current, total),
            |b, &(current, total)| b.iter(|| page_range(black_box(current), black_box(total))),
        );
    }
    group.finish();
}

fn bench_place_controls(c: &mut Criterion) {
    let page = PageNumber::new(50).unwrap_or(PageNumber::FIRST);
    let pagination = Pagination::new(1_000, 10, page);
    let area = Rect::new(0, 22, 120, 1);

    c.bench_function("place_controls_middle_page", |b| {
        b.iter(|| place_controls(black_box(&pagination.controls()), black_box(area)))
    });
}

criterion_group!(benches, bench_page_range, bench_place_controls);
criterion_main!(benches);
