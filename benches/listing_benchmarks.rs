//! Benchmarks for list filtering, sorting and paging

use ballpark_core::listing::{CommentField, InquiryField, UserField};
use ballpark_core::utils::{display_file_name, format_date_time, sort_newest_first};
use ballpark_core::{
    BoardRef, Comment, Config, FilterContext, Inquiry, ListState, SearchQuery, User,
    filter_records,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn users(count: i64) -> Vec<User> {
    (1..=count)
        .map(|n| User {
            user_unique_number: n,
            user_id: Some(format!("member{n}")),
            user_name: Some(format!("Member Number {n}")),
            user_email: Some(format!("member{n}@example.com")),
            user_create_date: Some(format!("2024-{:02}-{:02}T10:00:00", n % 12 + 1, n % 28 + 1)),
            ..User::default()
        })
        .collect()
}

fn comments(count: i64) -> Vec<Comment> {
    (1..=count)
        .map(|n| Comment {
            post_id: n / 10 + 1,
            post_comment_num: n,
            author: (n % 7 != 0).then(|| format!("writer{}", n % 97)),
            content: Some(format!("What a game number {n}, the bullpen held on")),
            category_name: Some(BoardRef::Id(n % 10 + 1)),
            date: Some(format!("2024-05-{:02} 18:{:02}:00", n % 28 + 1, n % 60)),
            ..Comment::default()
        })
        .collect()
}

fn inquiries(count: i64) -> Vec<Inquiry> {
    (1..=count)
        .map(|n| Inquiry {
            question_num: n,
            question_title: Some(format!("Question {n}")),
            question_id: Some(format!("fan{n}")),
            question_answer: (n % 3 == 0).then(|| "Handled".to_string()),
            ..Inquiry::default()
        })
        .collect()
}

/// Benchmark filtering across list sizes and categories
fn bench_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtering");
    let ctx = FilterContext::from(&Config::default());

    for size in [100_i64, 1_000, 10_000] {
        let users = users(size);
        let comments = comments(size);
        let inquiries = inquiries(size);
        group.throughput(Throughput::Elements(u64::try_from(size).unwrap_or_default()));

        let by_email = SearchQuery::new("99@example", UserField::Email);
        group.bench_with_input(BenchmarkId::new("users_email", size), &users, |b, users| {
            b.iter(|| filter_records(black_box(users), &by_email, &ctx).len());
        });

        let by_board = SearchQuery::new("giants", CommentField::Board);
        group.bench_with_input(
            BenchmarkId::new("comments_board", size),
            &comments,
            |b, comments| b.iter(|| filter_records(black_box(comments), &by_board, &ctx).len()),
        );

        let by_author = SearchQuery::new("NO AUTHOR", CommentField::Author);
        group.bench_with_input(
            BenchmarkId::new("comments_placeholder_author", size),
            &comments,
            |b, comments| b.iter(|| filter_records(black_box(comments), &by_author, &ctx).len()),
        );

        let unanswered = SearchQuery::new("unanswered", InquiryField::Answered);
        group.bench_with_input(
            BenchmarkId::new("inquiries_unanswered", size),
            &inquiries,
            |b, inquiries| b.iter(|| filter_records(black_box(inquiries), &unanswered, &ctx).len()),
        );
    }

    group.finish();
}

/// Benchmark the newest-first sort applied after every load
fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorting");

    for size in [1_000_i64, 10_000] {
        let comments = comments(size);
        group.bench_with_input(BenchmarkId::new("comments", size), &comments, |b, comments| {
            b.iter(|| {
                let mut rows = comments.clone();
                sort_newest_first(&mut rows, |c| c.date.as_deref());
                rows
            });
        });
    }

    group.finish();
}

/// Benchmark page rendering inputs for a screen
fn bench_paging(c: &mut Criterion) {
    let mut group = c.benchmark_group("paging");
    let ctx = FilterContext::from(&Config::default());

    let Ok(mut list) = ListState::new(20, ctx) else {
        return;
    };
    list.replace(users(10_000));
    list.set_query(SearchQuery::new("member", UserField::Id));

    group.bench_function("page_after_filter", |b| {
        b.iter(|| {
            list.go_to_page(black_box(250));
            list.page().len()
        });
    });

    group.bench_function("format_date_time", |b| {
        b.iter(|| format_date_time(black_box("2024-05-17T18:42:10.123")));
    });

    group.bench_function("display_file_name", |b| {
        b.iter(|| display_file_name(black_box("/uploads/1700000000_scorecard_final.pdf")));
    });

    group.finish();
}

criterion_group!(benches, bench_filtering, bench_sorting, bench_paging);
criterion_main!(benches);
