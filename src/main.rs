use idacube::prelude::*;

fn main() -> anyhow::Result<()> {
    let config = SolverConfig::from_env()?;
    simple_logger::SimpleLogger::new()
        .with_level(config.log_level)
        .init()?;

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cube = match args.as_slice() {
        [flag, moves] if flag == "--scramble" => {
            let cube = Cube::solved().apply_all(Move::parse_sequence(moves)?);
            println!("{}", to_facelets(&cube));
            cube
        }
        [facelets] => parse_facelets(facelets)?,
        _ => anyhow::bail!("usage: idacube <FACELETS> | idacube --scramble \"<MOVES>\""),
    };
    println!("{}", cube);

    let solver = CubeSolver::new(&config)?;
    let start = std::time::Instant::now();
    let solution = solver.solve_cube(&cube);
    log::info!("Solved in {:?}", start.elapsed());

    println!("{}", format_moves(&solution));
    Ok(())
}
