use std::sync::Arc;
use std::thread;

use tabfunc::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use tabfunc::concurrent::tasks::{
    MultiplyingTask,
    ReadTask,
    WriteTask
};
use tabfunc::configuration::Configuration;
use tabfunc::function::elementaryfunction::ConstantFunction;
use tabfunc::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use tabfunc::function::tabulatedfunctionerror::TabulatedResult;

const POINT_COUNT: usize = 1000;
const MULTIPLYING_THREADS: usize = 4;

fn main() -> TabulatedResult<()> {
    let config = match std::env::args().nth(1) {
        Some(config_path) => Configuration::from_reader(&config_path)?,
        None => Configuration::default()
    };

    let source = ConstantFunction::new(-1.0);
    let function = LinkedListTabulatedFunction::from_function(&source, 1.0, POINT_COUNT as f64, POINT_COUNT)?;
    let shared = Arc::new(SynchronizedTabulatedFunction::new(function));

    thread::scope(|scope| -> TabulatedResult<()> {
        let mut handles = Vec::new();
        for _ in 0..MULTIPLYING_THREADS {
            let task = MultiplyingTask::new(Arc::clone(&shared));
            handles.push(scope.spawn(move || task.run()));
        }
        let writer = WriteTask::new(Arc::clone(&shared), 0.5);
        handles.push(scope.spawn(move || writer.run()));

        for (thread_index, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(result) => println!("Flow {} completed the task, {} points", thread_index, result?),
                Err(_) => println!("Flow {} panicked", thread_index)
            }
        }
        Ok(())
    })?;

    let points = ReadTask::new(Arc::clone(&shared)).run()?;
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        println!("first: [{}; {}], last: [{}; {}]", first.x(), first.y(), last.x(), last.y());
    }

    let derivative = config.differential_operator().derive_synchronously(shared.as_ref())?;
    println!("derivative: {} points over [{}, {}]",
             derivative.count(),
             derivative.left_bound(),
             derivative.right_bound());
    Ok(())
}
