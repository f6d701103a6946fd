#![allow(clippy::cast_possible_truncation)]
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::types::{Int32Type, Int64Type};
use arrow_array::{Array, ArrayRef, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType as ArrowDataType, Field, Schema};
use graphar_error::GarError;
use graphar_io::{ChunkLoader, InMemoryChunkLoader, LocalChunkLoader};
use graphar_layout::{ChunkLayout, chunk_row_range};
use graphar_schema::{
    AdjList, AdjListType, DataType, EdgeInfo, FileType, GraphInfo, Property, PropertyGroup,
    VertexInfo, columns,
};
use parquet::arrow::ArrowWriter;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::{EdgeReader, ExecutionMode, GraphArchive, ReadOptions, VertexReader};

const VERTEX_COUNT: u64 = 903;
const VERTEX_CHUNK_SIZE: u64 = 100;
const EDGE_CHUNK_SIZE: u64 = 1024;
const EDGES_PER_VERTEX_CHUNK: [u64; 10] = [616, 616, 1077, 616, 616, 616, 616, 616, 616, 621];
const EDGE_COUNT: u64 = 6626;

fn id_group() -> PropertyGroup {
    PropertyGroup::try_new(
        vec![Property::new("id", DataType::Int64).with_primary(true)],
        FileType::Parquet,
        None,
    )
    .unwrap()
}

fn name_group() -> PropertyGroup {
    PropertyGroup::try_new(
        vec![
            Property::new("firstName", DataType::String),
            Property::new("lastName", DataType::String),
        ],
        FileType::Csv,
        None,
    )
    .unwrap()
}

fn creation_group() -> PropertyGroup {
    PropertyGroup::try_new(
        vec![Property::new("creationDate", DataType::String)],
        FileType::Parquet,
        None,
    )
    .unwrap()
}

fn graph() -> GraphInfo {
    let person = VertexInfo::try_new(
        "person",
        VERTEX_CHUNK_SIZE,
        vec![id_group(), name_group()],
        None,
        None,
    )
    .unwrap();
    let knows = EdgeInfo::builder("person", "knows", "person")
        .chunk_size(EDGE_CHUNK_SIZE)
        .src_chunk_size(VERTEX_CHUNK_SIZE)
        .dst_chunk_size(VERTEX_CHUNK_SIZE)
        .adj_list(
            AdjList::try_new(
                AdjListType::OrderedBySource,
                FileType::Parquet,
                vec![creation_group()],
                None,
            )
            .unwrap(),
        )
        .adj_list(
            AdjList::try_new(
                AdjListType::UnorderedByDest,
                FileType::Parquet,
                vec![creation_group()],
                None,
            )
            .unwrap(),
        )
        .build()
        .unwrap();
    GraphInfo::try_new("ldbc", vec![person], vec![knows], None, None).unwrap()
}

fn creation_date(src: i64, dst: i64) -> String {
    format!("{src}->{dst}")
}

fn array<A: Array + 'static>(array: A) -> ArrayRef {
    Arc::new(array)
}

fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    RecordBatch::try_from_iter(columns).unwrap()
}

fn write_parquet(path: &Path, batch: &RecordBatch) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut writer = ArrowWriter::try_new(File::create(path).unwrap(), batch.schema(), None).unwrap();
    writer.write(batch).unwrap();
    writer.close().unwrap();
}

fn write_counter(path: &Path, count: u64) {
    write_parquet(
        path,
        &batch(vec![(
            columns::COUNT,
            array(Int64Array::from(vec![count as i64])),
        )]),
    );
}

/// The edges of one vertex chunk, ordered by source: (src, dst, offsets).
///
/// The chunk's edges are spread as evenly as possible over its vertices, and vertex `v` links to
/// the vertices that follow it.
fn edges_of_vertex_chunk(vertex_chunk: u64) -> (Vec<i64>, Vec<i64>, Vec<i64>) {
    let vertices = chunk_row_range(VERTEX_COUNT, VERTEX_CHUNK_SIZE, vertex_chunk);
    let num_vertices = vertices.end - vertices.start;
    let total = EDGES_PER_VERTEX_CHUNK[vertex_chunk as usize];

    let (mut src, mut dst, mut offsets) = (Vec::new(), Vec::new(), vec![0]);
    for (local, id) in vertices.enumerate() {
        let degree = total / num_vertices + u64::from((local as u64) < total % num_vertices);
        for k in 0..degree {
            src.push(id as i64);
            dst.push(((id + k + 1) % VERTEX_COUNT) as i64);
        }
        offsets.push(src.len() as i64);
    }
    (src, dst, offsets)
}

fn write_archive(edge_counters: bool) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let info = graph();
    let layout = ChunkLayout::new(dir.path());

    let person = info.vertex_info("person").unwrap();
    write_counter(&layout.vertex_count(person), VERTEX_COUNT);
    for chunk in 0..EDGES_PER_VERTEX_CHUNK.len() as u64 {
        let ids = chunk_row_range(VERTEX_COUNT, VERTEX_CHUNK_SIZE, chunk);
        write_parquet(
            &layout.vertex_property_chunk(person, &id_group(), chunk),
            &batch(vec![(
                "id",
                array(Int64Array::from_iter_values(
                    ids.clone().map(|id| id as i64),
                )),
            )]),
        );

        let mut csv = String::from("firstName,lastName\n");
        for id in ids {
            csv.push_str(&format!("first{id},last{id}\n"));
        }
        let path = layout.vertex_property_chunk(person, &name_group(), chunk);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, csv).unwrap();
    }

    let knows = info.edge_info("person", "knows", "person").unwrap();
    let adj = knows.adj_list(AdjListType::OrderedBySource).unwrap();
    write_counter(&layout.edge_vertex_count(knows, adj), VERTEX_COUNT);
    for (vertex_chunk, count) in EDGES_PER_VERTEX_CHUNK.iter().enumerate() {
        let vertex_chunk = vertex_chunk as u64;
        let (src, dst, offsets) = edges_of_vertex_chunk(vertex_chunk);
        write_parquet(
            &layout.offset_chunk(knows, adj, vertex_chunk),
            &batch(vec![(columns::OFFSET, array(Int64Array::from(offsets)))]),
        );
        if edge_counters {
            write_counter(&layout.edge_count(knows, adj, vertex_chunk), *count);
        }

        let size = EDGE_CHUNK_SIZE as usize;
        for (sub_chunk, (src, dst)) in src.chunks(size).zip(dst.chunks(size)).enumerate() {
            let sub_chunk = sub_chunk as u64;
            write_parquet(
                &layout.adj_list_chunk(knows, adj, vertex_chunk, sub_chunk),
                &batch(vec![
                    (columns::SRC_INDEX, array(Int64Array::from(src.to_vec()))),
                    (columns::DST_INDEX, array(Int64Array::from(dst.to_vec()))),
                ]),
            );
            let dates = src
                .iter()
                .zip(dst)
                .map(|(s, d)| creation_date(*s, *d))
                .collect::<Vec<_>>();
            write_parquet(
                &layout.edge_property_chunk(knows, adj, &creation_group(), vertex_chunk, sub_chunk),
                &batch(vec![("creationDate", array(StringArray::from(dates)))]),
            );
        }
    }
    dir
}

#[fixture]
#[once]
fn archive() -> TempDir {
    write_archive(true)
}

#[fixture]
#[once]
fn archive_without_edge_counters() -> TempDir {
    write_archive(false)
}

fn open(dir: &TempDir) -> GraphArchive {
    GraphArchive::open_local(graph(), dir.path())
}

fn int64s(table: &RecordBatch, column: &str) -> Vec<i64> {
    table
        .column_by_name(column)
        .unwrap()
        .as_primitive::<Int64Type>()
        .values()
        .to_vec()
}

fn strings(table: &RecordBatch, column: &str) -> Vec<String> {
    table
        .column_by_name(column)
        .unwrap()
        .as_string::<i32>()
        .iter()
        .map(|v| v.unwrap().to_string())
        .collect()
}

fn column_names(table: &RecordBatch) -> Vec<String> {
    table
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

#[rstest]
fn vertex_counts(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive.vertex_reader("person").unwrap();
    assert_eq!(reader.vertex_count().unwrap(), VERTEX_COUNT);
    assert_eq!(reader.chunk_count().unwrap(), 10);
}

#[rstest]
#[case(0, 0..100)]
#[case(2, 200..300)]
#[case(9, 900..903)]
fn vertex_property_chunk(archive: &TempDir, #[case] chunk: u64, #[case] ids: std::ops::Range<i64>) {
    let archive = open(archive);
    let reader = archive.vertex_reader("person").unwrap();
    let table = reader.read_vertex_property_chunk(&id_group(), chunk).unwrap();

    assert_eq!(column_names(&table), vec!["id"]);
    assert_eq!(int64s(&table, "id"), ids.collect::<Vec<_>>());
}

#[rstest]
fn vertex_property_group_with_index(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive.vertex_reader("person").unwrap();
    let table = reader.read_vertex_property_group(&id_group(), true).unwrap();

    assert_eq!(table.num_rows(), VERTEX_COUNT as usize);
    assert_eq!(column_names(&table), vec![columns::VERTEX_INDEX, "id"]);
    assert_eq!(
        int64s(&table, columns::VERTEX_INDEX),
        int64s(&table, "id")
    );
}

#[rstest]
fn csv_property_group(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive.vertex_reader("person").unwrap();
    let table = reader.read_vertex_property_group(&name_group(), false).unwrap();

    assert_eq!(table.num_rows(), VERTEX_COUNT as usize);
    let first_names = strings(&table, "firstName");
    assert_eq!(first_names[0], "first0");
    assert_eq!(first_names[902], "first902");
}

#[rstest]
fn all_vertex_property_groups(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive.vertex_reader("person").unwrap();
    let table = reader.read_all_vertex_property_groups(true).unwrap();

    assert_eq!(table.num_rows(), VERTEX_COUNT as usize);
    assert_eq!(
        column_names(&table),
        vec![columns::VERTEX_INDEX, "id", "firstName", "lastName"]
    );
    assert_eq!(strings(&table, "lastName")[517], "last517");
}

#[rstest]
fn multiple_vertex_property_groups_keep_request_order(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive.vertex_reader("person").unwrap();
    let table = reader
        .read_multiple_vertex_property_groups(&[name_group(), id_group()], false)
        .unwrap();

    assert_eq!(column_names(&table), vec!["firstName", "lastName", "id"]);
    assert_eq!(int64s(&table, "id")[450], 450);
    assert_eq!(strings(&table, "firstName")[450], "first450");
}

#[test]
fn unknown_vertex_group_fails_before_loading() {
    let info = graph();
    let person = info.vertex_info("person").unwrap();
    let loader = Arc::new(InMemoryChunkLoader::new());
    let reader = VertexReader::new(person, "/g", loader.clone(), ReadOptions::default());

    // Same property, different file type: not the declared group.
    let ad_hoc = PropertyGroup::try_new(
        vec![Property::new("id", DataType::Int64).with_primary(true)],
        FileType::Csv,
        None,
    )
    .unwrap();

    let err = reader.read_vertex_property_chunk(&ad_hoc, 0).unwrap_err();
    assert!(matches!(err, GarError::UnknownPropertyGroup(..)));
    let err = reader
        .read_multiple_vertex_property_groups(&[id_group(), ad_hoc], true)
        .unwrap_err();
    assert!(matches!(err, GarError::UnknownPropertyGroup(..)));
    let err = reader
        .read_multiple_vertex_property_groups(&[], true)
        .unwrap_err();
    assert!(matches!(err, GarError::InvalidArgument(..)));

    assert_eq!(loader.load_count(), 0);
}

#[test]
fn missing_vertex_counter() {
    let dir = tempfile::tempdir().unwrap();
    let info = graph();
    let reader = VertexReader::new(
        info.vertex_info("person").unwrap(),
        dir.path(),
        Arc::new(LocalChunkLoader),
        ReadOptions::default(),
    );
    let err = reader.vertex_count().unwrap_err();
    assert!(matches!(err, GarError::MetadataMissing(..)));
}

#[rstest]
fn missing_vertex_chunk(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive.vertex_reader("person").unwrap();
    let err = reader
        .read_vertex_property_chunk(&id_group(), 10)
        .unwrap_err();
    assert!(err.is_chunk_not_found());
}

#[test]
fn undeclared_adj_list_type() {
    let info = graph();
    let knows = info.edge_info("person", "knows", "person").unwrap();
    let result = EdgeReader::try_new(
        knows,
        AdjListType::OrderedByDest,
        "/g",
        Arc::new(InMemoryChunkLoader::new()),
        ReadOptions::default(),
    );
    assert!(matches!(result, Err(GarError::UnsupportedAdjListType(..))));
}

#[test]
fn unordered_lists_have_no_offsets() {
    let info = graph();
    let knows = info.edge_info("person", "knows", "person").unwrap();
    let loader = Arc::new(InMemoryChunkLoader::new());
    let reader = EdgeReader::try_new(
        knows,
        AdjListType::UnorderedByDest,
        "/g",
        loader.clone(),
        ReadOptions::default(),
    )
    .unwrap();

    assert!(matches!(
        reader.read_offset(0),
        Err(GarError::UnsupportedAdjListType(..))
    ));
    assert!(matches!(
        reader.read_adj_list_for_vertex(5),
        Err(GarError::UnsupportedAdjListType(..))
    ));
    assert!(matches!(
        reader.edge_count_for_vertex_chunk(0),
        Err(GarError::MetadataMissing(..))
    ));
    assert_eq!(loader.load_count(), 0);
}

#[test]
fn missing_offset_chunk_is_missing_metadata() {
    let info = graph();
    let knows = info.edge_info("person", "knows", "person").unwrap();
    let adj = knows.adj_list(AdjListType::OrderedBySource).unwrap();
    let layout = ChunkLayout::new("/g");
    let loader = Arc::new(InMemoryChunkLoader::new());
    loader.insert(
        layout.edge_vertex_count(knows, adj),
        batch(vec![(columns::COUNT, array(Int64Array::from(vec![3])))]),
    );
    let reader = EdgeReader::try_new(
        knows,
        AdjListType::OrderedBySource,
        "/g",
        loader,
        ReadOptions::default(),
    )
    .unwrap();

    assert!(matches!(
        reader.read_offset(0),
        Err(GarError::MetadataMissing(..))
    ));
    assert!(matches!(
        reader.read_offset_table(0),
        Err(GarError::MetadataMissing(..))
    ));
    assert!(matches!(
        reader.edge_count_for_vertex_chunk(0),
        Err(GarError::MetadataMissing(..))
    ));
    assert!(matches!(
        reader.read_adj_list_for_vertex(1),
        Err(GarError::MetadataMissing(..))
    ));
}

#[test]
fn vertex_without_edges() {
    let info = graph();
    let knows = info.edge_info("person", "knows", "person").unwrap();
    let adj = knows.adj_list(AdjListType::OrderedBySource).unwrap();
    let layout = ChunkLayout::new("/g");
    let loader = Arc::new(InMemoryChunkLoader::new());
    loader.insert(
        layout.edge_vertex_count(knows, adj),
        batch(vec![(columns::COUNT, array(Int64Array::from(vec![3])))]),
    );
    loader.insert(
        layout.offset_chunk(knows, adj, 0),
        batch(vec![(columns::OFFSET, array(Int64Array::from(vec![0, 2, 2, 4])))]),
    );
    loader.insert(
        layout.adj_list_chunk(knows, adj, 0, 0),
        batch(vec![
            (columns::SRC_INDEX, array(Int64Array::from(vec![0, 0, 2, 2]))),
            (columns::DST_INDEX, array(Int64Array::from(vec![1, 2, 0, 1]))),
        ]),
    );
    let reader = EdgeReader::try_new(
        knows,
        AdjListType::OrderedBySource,
        "/g",
        loader.clone(),
        ReadOptions::default(),
    )
    .unwrap();

    let isolated = reader.read_adj_list_for_vertex(1).unwrap();
    assert_eq!(isolated.num_rows(), 0);
    assert_eq!(
        column_names(&isolated),
        vec![columns::SRC_INDEX, columns::DST_INDEX]
    );
    // the counter and the offsets, no adjacency chunk
    assert_eq!(loader.load_count(), 2);

    let last = reader.read_adj_list_for_vertex(2).unwrap();
    assert_eq!(int64s(&last, columns::SRC_INDEX), vec![2, 2]);
    assert_eq!(int64s(&last, columns::DST_INDEX), vec![0, 1]);
    assert_eq!(reader.read_adj_list_for_vertex(0).unwrap().num_rows(), 2);
}

#[test]
fn csv_chunks_use_declared_types() {
    let dir = tempfile::tempdir().unwrap();
    let group = PropertyGroup::try_new(
        vec![
            Property::new("age", DataType::Int32),
            Property::new("nick", DataType::String),
        ],
        FileType::Csv,
        None,
    )
    .unwrap();
    let pet = VertexInfo::try_new("pet", 1, vec![group.clone()], None, None).unwrap();
    let layout = ChunkLayout::new(dir.path());

    write_counter(&layout.vertex_count(&pet), 2);
    for (chunk, rows) in ["age,nick\n30,bob\n", "age,nick\n31,\n"].iter().enumerate() {
        let path = layout.vertex_property_chunk(&pet, &group, chunk as u64);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rows).unwrap();
    }

    let reader = VertexReader::new(&pet, dir.path(), Arc::new(LocalChunkLoader), ReadOptions::default());
    let table = reader.read_vertex_property_group(&group, false).unwrap();

    assert_eq!(table.num_rows(), 2);
    assert_eq!(
        table.schema().field(0).data_type(),
        &ArrowDataType::Int32
    );
    assert_eq!(
        table
            .column(0)
            .as_primitive::<Int32Type>()
            .values()
            .to_vec(),
        vec![30, 31]
    );
    let nicks = table.column_by_name("nick").unwrap().as_string::<i32>();
    assert_eq!(nicks.value(0), "bob");
    assert!(nicks.is_null(1));
}

#[rstest]
fn edge_counts(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();

    assert_eq!(reader.vertex_count().unwrap(), VERTEX_COUNT);
    assert_eq!(reader.vertex_chunk_count().unwrap(), 10);
    assert_eq!(reader.sub_chunk_count(2).unwrap(), 2);
    assert_eq!(reader.sub_chunk_count(0).unwrap(), 1);
    assert_eq!(reader.edge_count_for_vertex_chunk(2).unwrap(), 1077);
    assert_eq!(reader.edge_count().unwrap(), EDGE_COUNT);
}

#[rstest]
fn offsets(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();

    let table = reader.read_offset(0).unwrap();
    assert_eq!(table.num_rows(), 101);
    assert_eq!(column_names(&table), vec![columns::OFFSET]);

    let offsets = reader.read_offset_table(0).unwrap();
    assert_eq!(offsets.vertex_count(), 100);
    assert_eq!(offsets.edge_count(), 616);

    assert_eq!(reader.read_offset_table(9).unwrap().vertex_count(), 3);
}

#[rstest]
fn adj_list_chunks(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();

    let first = reader.read_adj_list_chunk(2, 0).unwrap();
    assert_eq!(first.num_rows(), 1024);
    assert_eq!(
        column_names(&first),
        vec![columns::SRC_INDEX, columns::DST_INDEX]
    );
    assert_eq!(reader.read_adj_list_chunk(2, 1).unwrap().num_rows(), 53);
    assert!(reader.read_adj_list_chunk(2, 2).unwrap_err().is_chunk_not_found());
}

#[rstest]
fn adj_list_for_vertex_chunk(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();
    let table = reader.read_adj_list_for_vertex_chunk(2, true).unwrap();

    assert_eq!(table.num_rows(), 1077);
    assert_eq!(
        column_names(&table),
        vec![columns::EDGE_INDEX, columns::SRC_INDEX, columns::DST_INDEX]
    );
    assert_eq!(int64s(&table, columns::EDGE_INDEX), (0..1077).collect::<Vec<_>>());
    assert!(int64s(&table, columns::SRC_INDEX)
        .iter()
        .all(|src| (200..300).contains(src)));
}

#[rstest]
fn all_adj_list(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();
    let table = reader.read_all_adj_list(true).unwrap();

    assert_eq!(table.num_rows(), EDGE_COUNT as usize);
    assert_eq!(
        int64s(&table, columns::EDGE_INDEX),
        (0..EDGE_COUNT as i64).collect::<Vec<_>>()
    );
    assert!(int64s(&table, columns::SRC_INDEX).is_sorted());
}

#[rstest]
fn sub_chunks_are_probed_without_counters(archive_without_edge_counters: &TempDir) {
    let archive = open(archive_without_edge_counters);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();

    assert_eq!(reader.sub_chunk_count(2).unwrap(), 2);
    assert_eq!(
        reader.read_adj_list_for_vertex_chunk(2, false).unwrap().num_rows(),
        1077
    );
    assert_eq!(reader.edge_count_for_vertex_chunk(2).unwrap(), 1077);
    assert_eq!(reader.edge_count().unwrap(), EDGE_COUNT);
}

#[rstest]
fn edge_properties_align_with_adj_list(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();

    let adj = reader.read_adj_list_for_vertex_chunk(2, false).unwrap();
    let properties = reader
        .read_edge_property_group_for_vertex_chunk(&creation_group(), 2, false)
        .unwrap();
    assert_eq!(properties.num_rows(), adj.num_rows());

    let expected = int64s(&adj, columns::SRC_INDEX)
        .into_iter()
        .zip(int64s(&adj, columns::DST_INDEX))
        .map(|(src, dst)| creation_date(src, dst))
        .collect::<Vec<_>>();
    assert_eq!(strings(&properties, "creationDate"), expected);

    let chunk = reader
        .read_edge_property_chunk(&creation_group(), 2, 1)
        .unwrap();
    assert_eq!(chunk.num_rows(), 53);
}

#[rstest]
fn edge_property_groups(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();

    let all = reader.read_all_edge_property_groups().unwrap();
    assert_eq!(all.num_rows(), EDGE_COUNT as usize);
    assert_eq!(column_names(&all), vec!["creationDate"]);
    assert_eq!(
        reader
            .read_edge_property_group(&creation_group(), false)
            .unwrap(),
        all
    );

    let indexed = reader
        .read_edge_property_group(&creation_group(), true)
        .unwrap();
    assert_eq!(column_names(&indexed), vec![columns::EDGE_INDEX, "creationDate"]);
    assert_eq!(
        int64s(&indexed, columns::EDGE_INDEX).last().copied(),
        Some(EDGE_COUNT as i64 - 1)
    );
    assert_eq!(
        reader
            .read_all_edge_property_groups_for_vertex_chunk(9)
            .unwrap()
            .num_rows(),
        621
    );
    assert_eq!(
        reader
            .read_multiple_edge_property_groups_for_vertex_chunk(&[creation_group()], 0)
            .unwrap()
            .num_rows(),
        616
    );
}

#[rstest]
fn edge_property_groups_are_validated(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();

    assert!(matches!(
        reader.read_edge_property_group(&id_group(), false),
        Err(GarError::UnknownPropertyGroup(..))
    ));
    assert!(matches!(
        reader.read_multiple_edge_property_groups(&[creation_group(), id_group()]),
        Err(GarError::UnknownPropertyGroup(..))
    ));
    assert!(matches!(
        reader.read_multiple_edge_property_groups(&[]),
        Err(GarError::InvalidArgument(..))
    ));
}

#[rstest]
fn edges_for_vertex_chunk(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();
    let table = reader.read_edges_for_vertex_chunk(2, true).unwrap();

    assert_eq!(table.num_rows(), 1077);
    assert_eq!(
        column_names(&table),
        vec![
            columns::EDGE_INDEX,
            columns::SRC_INDEX,
            columns::DST_INDEX,
            "creationDate"
        ]
    );
    let src = int64s(&table, columns::SRC_INDEX);
    let dst = int64s(&table, columns::DST_INDEX);
    assert_eq!(
        strings(&table, "creationDate")[1076],
        creation_date(src[1076], dst[1076])
    );
}

#[rstest]
fn parallel_reads_match_inline(archive: &TempDir) {
    let inline = open(archive);
    let parallel = open(archive)
        .with_options(ReadOptions::default().with_execution_mode(ExecutionMode::rayon(4).unwrap()));

    let expected = inline
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap()
        .read_edges(false)
        .unwrap();
    let actual = parallel
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap()
        .read_edges(false)
        .unwrap();

    assert_eq!(expected.num_rows(), EDGE_COUNT as usize);
    assert_eq!(actual, expected);

    let vertices = parallel
        .vertex_reader("person")
        .unwrap()
        .read_all_vertex_property_groups(true)
        .unwrap();
    assert_eq!(
        int64s(&vertices, "id"),
        (0..VERTEX_COUNT as i64).collect::<Vec<_>>()
    );
}

#[rstest]
#[case::inside_first_sub_chunk(250, 11)]
#[case::straddling_sub_chunks(294, 10)]
#[case::inside_second_sub_chunk(296, 10)]
#[case::last_vertex(902, 207)]
fn adj_list_for_vertex(archive: &TempDir, #[case] vertex: u64, #[case] degree: usize) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();
    let table = reader.read_adj_list_for_vertex(vertex).unwrap();

    assert_eq!(table.num_rows(), degree);
    assert!(int64s(&table, columns::SRC_INDEX)
        .iter()
        .all(|src| *src == vertex as i64));
    let expected = (1..=degree as u64)
        .map(|k| ((vertex + k) % VERTEX_COUNT) as i64)
        .collect::<Vec<_>>();
    assert_eq!(int64s(&table, columns::DST_INDEX), expected);
}

#[rstest]
fn adj_list_for_vertex_out_of_range(archive: &TempDir) {
    let archive = open(archive);
    let reader = archive
        .edge_reader("person", "knows", "person", AdjListType::OrderedBySource)
        .unwrap();
    assert!(matches!(
        reader.read_adj_list_for_vertex(VERTEX_COUNT),
        Err(GarError::InvalidArgument(..))
    ));
}

#[rstest]
fn unknown_labels(archive: &TempDir) {
    let archive = open(archive);
    assert!(matches!(
        archive.vertex_reader("comment"),
        Err(GarError::InvalidArgument(..))
    ));
    assert!(matches!(
        archive.edge_reader("person", "likes", "person", AdjListType::OrderedBySource),
        Err(GarError::InvalidArgument(..))
    ));
}

#[test]
fn staged_chunks_are_read_through_any_loader() {
    let info = graph();
    let person = info.vertex_info("person").unwrap();
    let layout = ChunkLayout::new("/staged");
    let loader = Arc::new(InMemoryChunkLoader::new());

    loader.insert(
        layout.vertex_count(person),
        batch(vec![(columns::COUNT, array(Int64Array::from(vec![3])))]),
    );
    loader.insert(
        layout.vertex_property_chunk(person, &id_group(), 0),
        batch(vec![("id", array(Int64Array::from(vec![7, 8, 9])))]),
    );

    let reader = VertexReader::new(person, "/staged", loader.clone(), ReadOptions::default());
    let table = reader.read_vertex_property_group(&id_group(), true).unwrap();
    assert_eq!(int64s(&table, columns::VERTEX_INDEX), vec![0, 1, 2]);
    assert_eq!(int64s(&table, "id"), vec![7, 8, 9]);
    assert!(loader.exists(&layout.vertex_count(person)));
    assert_eq!(loader.load_count(), 2);

    let schema = Schema::new(vec![Field::new("id", ArrowDataType::Int64, false)]);
    assert_eq!(table.schema().field(1).data_type(), schema.field(0).data_type());
}
