//! Write a deterministic synthetic `sales_data.csv` so the report binary can
//! be exercised without a real export.

use chrono::{Duration, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let catalogue: &[(&str, &[(&str, f64)])] = &[
        (
            "Furniture",
            &[("Standing Desk", 420.0), ("Office Chair", 180.0), ("Bookcase", 95.0)],
        ),
        (
            "Office Supplies",
            &[("Paper (A4, 5x500)", 24.0), ("Stapler", 12.5), ("Label Maker", 38.0)],
        ),
        (
            "Technology",
            &[("Laptop 14\"", 950.0), ("Wireless Mouse", 29.0), ("27\" Monitor", 310.0)],
        ),
    ];
    let regions = ["East", "West", "Central", "South"];

    let start = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
    let n_rows = 800;

    let output_path = "sales_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["Order Date", "Category", "Region", "Sales", "Profit", "Product Name"])
        .expect("Failed to write header");

    for _ in 0..n_rows {
        let (category, products) = rng.pick(catalogue);
        let (product, base_price) = rng.pick(products);
        let region = rng.pick(&regions);

        let date = start + Duration::days((rng.next_u64() % 366) as i64);
        let quantity = 1 + (rng.next_u64() % 5) as i64;
        let sales = base_price * quantity as f64 * (0.9 + 0.2 * rng.next_f64());
        // Margin between -20% and +40%; some orders lose money.
        let profit = sales * (-0.2 + 0.6 * rng.next_f64());

        // A few exports leave Profit blank; the loader zero-fills these.
        let profit_cell = if rng.next_f64() < 0.02 {
            String::new()
        } else {
            format!("{profit:.2}")
        };

        writer
            .write_record([
                date.format("%d/%m/%Y").to_string(),
                category.to_string(),
                region.to_string(),
                format!("{sales:.2}"),
                profit_cell,
                product.to_string(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} orders to {output_path}");
}
