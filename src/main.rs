use islandgen::config::Params;
use islandgen::generator::Generator;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let map_size: f64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(500.0);
    let voronoi_cell_count: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(2000);

    let mut params = Params::default();
    params.seed = seed;
    params.map_size = map_size;
    params.voronoi_cell_count = voronoi_cell_count;

    if let Err(e) = params.validate() {
        eprintln!("invalid configuration: {}", e);
        std::process::exit(1);
    }

    eprintln!(
        "Generating a {}x{} island with seed={}, {} sites",
        map_size, map_size, seed, voronoi_cell_count
    );

    let generator = Generator::new();
    let result = generator.generate(
        &params,
        |stage, fraction| eprintln!("  [{:>5.1}%] {:?}", fraction * 100.0, stage),
        None,
    );

    let (snapshot, timings) = match result {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("generation failed: {}", e);
            std::process::exit(1);
        }
    };

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    let land = snapshot.cells.iter().filter(|s| s.is_land).count();
    let rivers = snapshot.rivers.len();
    let lakes = snapshot.lakes.len();
    let edges = snapshot.transport.edges.len();
    let crossings = snapshot.transport.crossings.len();

    eprintln!(
        "\n{} sites ({} land, {:.1}% land), {} river edges, {} lakes, {} transport edges, {} crossings",
        snapshot.cells.len(),
        land,
        100.0 * land as f64 / snapshot.cells.len().max(1) as f64,
        rivers,
        lakes,
        edges,
        crossings,
    );
}
