use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NEIGHBOURHOODS: [&str; 5] = ["Centro", "Trastevere", "Monti", "Prati", "Testaccio"];

struct Listing {
    id: Option<i64>,
    bedrooms: i64,
    bathrooms: f64,
    price: f64,
    review_scores_rating: Option<f64>,
    neighbourhood: &'static str,
}

fn generate_listing(id: i64, rng: &mut StdRng) -> Listing {
    let bedrooms: i64 = rng.random_range(1..=4);
    let bathrooms = (rng.random_range(2..=(bedrooms * 2).max(2)) as f64) / 2.0;
    let base = 45.0 + 30.0 * bedrooms as f64 + 15.0 * bathrooms;
    let price = (base * rng.random_range(0.8..1.3) * 100.0).round() / 100.0;
    // a few listings have no reviews yet, a few lost their id in export
    let review_scores_rating =
        (!rng.random_bool(0.08)).then(|| (rng.random_range(3.5..5.0) * 100.0_f64).round() / 100.0);
    let id = (!rng.random_bool(0.02)).then_some(id);

    Listing {
        id,
        bedrooms,
        bathrooms,
        price,
        review_scores_rating,
        neighbourhood: NEIGHBOURHOODS[rng.random_range(0..NEIGHBOURHOODS.len())],
    }
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let listings: Vec<Listing> = (0..250)
        .map(|i| generate_listing(10_000 + i, &mut rng))
        .collect();

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, true),
        Field::new("bedrooms", DataType::Int64, false),
        Field::new("bathrooms", DataType::Float64, false),
        Field::new("price", DataType::Float64, false),
        Field::new("review_scores_rating", DataType::Float64, true),
        Field::new("neighbourhood", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(listings.iter().map(|l| l.id).collect::<Vec<_>>())),
            Arc::new(Int64Array::from(listings.iter().map(|l| l.bedrooms).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(listings.iter().map(|l| l.bathrooms).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(listings.iter().map(|l| l.price).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(
                listings
                    .iter()
                    .map(|l| l.review_scores_rating)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                listings.iter().map(|l| l.neighbourhood).collect::<Vec<_>>(),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_listings.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    // Write CSV with the same rows
    let csv_path = "sample_listings.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    csv_writer
        .write_record([
            "id",
            "bedrooms",
            "bathrooms",
            "price",
            "review_scores_rating",
            "neighbourhood",
        ])
        .expect("Failed to write CSV header");
    for l in &listings {
        csv_writer
            .write_record([
                l.id.map(|v| v.to_string()).unwrap_or_default(),
                l.bedrooms.to_string(),
                l.bathrooms.to_string(),
                format!("{:.2}", l.price),
                l.review_scores_rating
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                l.neighbourhood.to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    csv_writer.flush().expect("Failed to flush CSV");

    println!(
        "Wrote {} listings to {parquet_path} and {csv_path}",
        listings.len()
    );
}
