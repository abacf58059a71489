//! Queries on the student network from Koller & Friedman (page 53).
//!
//! Run with `RUST_LOG=debug` to watch each elimination step.

use ndarray::array;
use sumproduct as s;

fn main() -> s::Result<()> {
    env_logger::init();

    let difficulty = s::Variable::new("d");
    let intelligence = s::Variable::new("i");
    let grade = s::Variable::new("g");
    let sat = s::Variable::new("s");
    let letter = s::Variable::new("l");

    /////////////////////////////////////////////////////
    // Step 1: Build Model
    let model = s::FactorCollection::new(vec![
        s::Factor::new(vec![difficulty.clone()], array![0.6, 0.4].into_dyn())?,
        s::Factor::new(vec![intelligence.clone()], array![0.7, 0.3].into_dyn())?,
        s::Factor::new(
            vec![difficulty.clone(), intelligence.clone(), grade.clone()],
            array![[[0.3, 0.4, 0.3], [0.05, 0.25, 0.7]],
                   [[0.9, 0.08, 0.02], [0.5, 0.3, 0.2]]].into_dyn()
        )?,
        s::Factor::new(
            vec![intelligence.clone(), sat.clone()],
            array![[0.95, 0.05], [0.2, 0.8]].into_dyn()
        )?,
        s::Factor::new(
            vec![grade.clone(), letter.clone()],
            array![[0.1, 0.9], [0.4, 0.6], [0.99, 0.01]].into_dyn()
        )?,
    ]);

    /////////////////////////////////////////////////////
    // Step 2: Query without evidence
    println!("Joint probability of letter (good/bad) and SAT (low/high) without evidence:");
    let result = model.clone().eliminate(&[difficulty.clone(), intelligence.clone(), grade.clone()])?;
    println!("{}\n", result);

    /////////////////////////////////////////////////////
    // Step 3: Condition by hand, then eliminate
    println!("Probability of intelligence (low/high) given a good letter:");
    let mut query = model.clone();
    query.condition(&[letter.clone()], &[0])?;
    let mut result = query.eliminate(&[difficulty.clone(), grade.clone(), sat.clone()])?;
    result.normalize()?;
    println!("{}\n", result);

    /////////////////////////////////////////////////////
    // Step 4: Let an engine snapshot the model for us
    println!("Probability of intelligence (low/high) given a good letter and a high SAT score:");
    let mut evidence = s::Assignment::new();
    evidence.set(&letter, 0);
    evidence.set(&sat, 1);

    let engine = s::VariableEliminationEngine::new(&model, &evidence)?;
    let result = engine.infer(&[difficulty, grade])?;
    println!("{}", result);

    Ok(())
}
