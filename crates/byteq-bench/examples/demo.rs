//! Two-queue demonstration driver.
//!
//! Demonstrates: create → enqueue → create a neighbour → interleave → dequeue,
//! then a heavier fill that forces compaction. Any arena error is reported and
//! terminates the process.

use std::process;

use byteq_arena::{ArenaError, QueueArena};

fn fail(err: ArenaError) -> ! {
    eprintln!("arena error: {err}");
    process::exit(1);
}

fn main() {
    println!("=== byteq Arena Demo ===\n");

    let mut arena = QueueArena::with_defaults();

    // --- Scenario 1: interleaved queues ---
    let q0 = arena.create_queue().unwrap_or_else(|e| fail(e));
    arena.enqueue_byte(q0, 0).unwrap_or_else(|e| fail(e));
    arena.enqueue_byte(q0, 1).unwrap_or_else(|e| fail(e));
    let q1 = arena.create_queue().unwrap_or_else(|e| fail(e));
    arena.enqueue_byte(q1, 3).unwrap_or_else(|e| fail(e));
    arena.enqueue_byte(q0, 2).unwrap_or_else(|e| fail(e));
    arena.enqueue_byte(q1, 4).unwrap_or_else(|e| fail(e));

    for _ in 0..2 {
        let byte = arena.dequeue_byte(q0).unwrap_or_else(|e| fail(e));
        println!("{byte}");
    }

    println!("\nLayout after scenario 1:");
    for desc in arena.layouts() {
        println!("  {desc}");
    }
    println!("  free={} mid={}", arena.free_space(), arena.mid_space());

    // --- Scenario 2: fill both queues past their initial gaps ---
    println!("\nFilling q1 with 500 bytes and q0 with 400 bytes...");
    for i in 0..500u32 {
        arena.enqueue_byte(q1, i as u8).unwrap_or_else(|e| fail(e));
    }
    for i in 0..400u32 {
        arena.enqueue_byte(q0, i as u8).unwrap_or_else(|e| fail(e));
    }
    let stats = arena.stats();
    println!(
        "  shift_right={} shift_left={} bytes_moved={}",
        stats.shift_right_runs, stats.shift_left_runs, stats.bytes_moved,
    );

    // q0 still holds the 2 from scenario 1 ahead of the fill.
    let head = arena.dequeue_byte(q0).unwrap_or_else(|e| fail(e));
    println!("  q0 head={head} remaining={:?}", arena.queue_len(q0));

    if let Err(violation) = arena.validate() {
        eprintln!("invariant violated: {violation}");
        process::exit(1);
    }

    // --- Teardown ---
    arena.destroy_queue(q0).unwrap_or_else(|e| fail(e));
    arena.destroy_queue(q1).unwrap_or_else(|e| fail(e));
    println!("\nFree space after teardown: {}", arena.free_space());

    // A dequeue with no queues left is caller misuse; the driver reports it.
    match arena.dequeue_byte(q0) {
        Ok(byte) => println!("unexpected byte {byte}"),
        Err(err) => println!("Expected rejection: {err}"),
    }
    println!("Done.");
}
