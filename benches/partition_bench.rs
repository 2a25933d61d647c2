use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use slr_floorplan::model::{AreaVector, DataflowGraph, DeviceGrid, Resource, SlotManager};
use slr_floorplan::partition::{eight_way_partition, four_way_partition, CrossingBudgets3, CrossingCaps3};
use slr_floorplan::PartitionMap;

criterion_group!(partition_ilp, bench_four_way_build, bench_eight_way_build);
criterion_main!(partition_ilp);

fn chain_graph(n: usize) -> (DataflowGraph, PartitionMap, SlotManager) {
    let mut graph = DataflowGraph::new();
    let mut vertices = Vec::with_capacity(n);
    for i in 0..n {
        let v = graph.add_vertex(format!("v{i}"), AreaVector::from_pairs([(Resource::Lut, 5.0)]), AreaVector::zero());
        vertices.push(v);
    }
    for pair in vertices.windows(2) {
        graph.add_edge(pair[0], pair[1], 8);
    }

    let slot_manager = SlotManager::new(DeviceGrid::uniform(8, 1, AreaVector::from_pairs([(Resource::Lut, 100_000.0)])));
    let root = slot_manager.root().clone();
    let init_v2s: PartitionMap = vertices.into_iter().map(|v| (v, root.clone())).collect();

    (graph, init_v2s, slot_manager)
}

fn bench_four_way_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("four_way_partition");
    for &size in &[8usize, 16, 32] {
        let (graph, init_v2s, slot_manager) = chain_graph(size);
        group.bench_function(BenchmarkId::new("vertices", size), |b| {
            b.iter(|| four_way_partition(&graph, &init_v2s, &[], &PartitionMap::new(), &slot_manager, 0.9, CrossingCaps3::uniform(10_000.0), 5).unwrap())
        });
    }
    group.finish();
}

fn bench_eight_way_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("eight_way_partition");
    for &size in &[8usize, 16, 32] {
        let (graph, init_v2s, slot_manager) = chain_graph(size);
        group.bench_function(BenchmarkId::new("vertices", size), |b| {
            b.iter(|| eight_way_partition(&graph, &init_v2s, &[], &PartitionMap::new(), &slot_manager, 0.9, CrossingBudgets3::uniform(10_000.0), 5).unwrap())
        });
    }
    group.finish();
}
