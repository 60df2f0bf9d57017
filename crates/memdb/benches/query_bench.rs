//! 查询引擎性能基准测试
//!
//! 测试覆盖：
//! - 不同数据量下的等值过滤
//! - 单关联与双关联解析
//! - 排序

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use loyalty_memdb::{Database, Direction, MutationMode, Record, Table};
use serde_json::json;
use std::hint::black_box;

/// 构造 `size` 张卡券，均匀分布在 10 家公司和 10 个计划上
fn populate(size: usize) -> Database {
    let db = Database::new(MutationMode::Persistent);

    let companies: Vec<Record> = (0..10)
        .map(|i| {
            Record::from(json!({
                "id": format!("C{}", i),
                "name": CompanyName().fake::<String>(),
            }))
        })
        .collect();
    let programs: Vec<Record> = (0..10)
        .map(|i| {
            Record::from(json!({
                "id": format!("L{}", i),
                "company_id": format!("C{}", i),
                "name": format!("Program {}", i),
            }))
        })
        .collect();
    let users: Vec<Record> = (0..size)
        .map(|i| {
            Record::from(json!({
                "id": format!("U{}", i),
                "name": Name().fake::<String>(),
                "email": SafeEmail().fake::<String>(),
                "points": (i % 500) as i64,
            }))
        })
        .collect();
    let passes: Vec<Record> = (0..size)
        .map(|i| {
            Record::from(json!({
                "id": format!("P{}", i),
                "company_id": format!("C{}", i % 10),
                "loyalty_program_id": format!("L{}", (i + 3) % 10),
                "serial_number": format!("SN-{:06}", i),
            }))
        })
        .collect();

    db.seed(Table::Companies, companies);
    db.seed(Table::LoyaltyPrograms, programs);
    db.seed(Table::Users, users);
    db.seed(Table::WalletPasses, passes);
    db
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [100, 1_000, 10_000] {
        let db = populate(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("where_eq", size), &db, |b, db| {
            b.iter(|| {
                black_box(
                    db.open(Table::Users)
                        .where_eq("points", 42)
                        .fetch(),
                )
            })
        });
    }

    group.finish();
}

fn bench_joins(c: &mut Criterion) {
    let mut group = c.benchmark_group("joins");

    for size in [100, 1_000, 10_000] {
        let db = populate(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("single", size), &db, |b, db| {
            b.iter(|| {
                black_box(
                    db.open(Table::WalletPasses)
                        .left_join(Table::Companies)
                        .fetch(),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("double", size), &db, |b, db| {
            b.iter(|| {
                black_box(
                    db.open(Table::WalletPasses)
                        .left_join(Table::Companies)
                        .left_join(Table::LoyaltyPrograms)
                        .where_eq("company_id", "C3")
                        .fetch(),
                )
            })
        });
    }

    group.finish();
}

fn bench_order(c: &mut Criterion) {
    let db = populate(10_000);
    c.bench_function("order_by_points_desc", |b| {
        b.iter(|| {
            black_box(
                db.open(Table::Users)
                    .order_by("points", Direction::Desc)
                    .fetch(),
            )
        })
    });
}

criterion_group!(benches, bench_filter, bench_joins, bench_order);
criterion_main!(benches);
