//! Program fixtures
//!
//! Statement numbers are noted next to each statement.

use pkb_analysis::{Program, ProgramBuilder};

/// `A{call B} B{call C} C{call D} D{print x}`
pub fn linear_call_chain() -> Program {
    ProgramBuilder::new()
        .procedure("A", |b| {
            b.call("B"); // 1
        })
        .procedure("B", |b| {
            b.call("C"); // 2
        })
        .procedure("C", |b| {
            b.call("D"); // 3
        })
        .procedure("D", |b| {
            b.print("x"); // 4
        })
        .build()
}

/// Three callers of `p`, each printing after the call
pub fn multi_caller() -> Program {
    ProgramBuilder::new()
        .procedure("A", |b| {
            b.call("p"); // 1
            b.print("a"); // 2
        })
        .procedure("B", |b| {
            b.call("p"); // 3
            b.print("a"); // 4
        })
        .procedure("C", |b| {
            b.call("p"); // 5
            b.print("a"); // 6
        })
        .procedure("p", |b| {
            b.print("a"); // 7
        })
        .build()
}

/// `p{a=1; b=a; c=b; d=c; e=d}`
pub fn data_flow_chain() -> Program {
    ProgramBuilder::new()
        .procedure("p", |b| {
            b.assign("a", &[]); // 1
            b.assign("b", &["a"]); // 2
            b.assign("c", &["b"]); // 3
            b.assign("d", &["c"]); // 4
            b.assign("e", &["d"]); // 5
        })
        .build()
}

/// `B` calls `C` three times; `C` rotates four variables
pub fn rotation() -> Program {
    ProgramBuilder::new()
        .procedure("B", |b| {
            b.call("C"); // 1
            b.call("C"); // 2
            b.call("C"); // 3
        })
        .procedure("C", |b| {
            b.assign("d", &["a"]); // 4
            b.assign("a", &["b"]); // 5
            b.assign("b", &["c"]); // 6
            b.assign("c", &["d"]); // 7
        })
        .build()
}

/// Loop in the caller, branch and nested call in the callee
pub fn accumulator() -> Program {
    ProgramBuilder::new()
        .procedure("main", |b| {
            b.read("n"); // 1
            b.assign("total", &[]); // 2
            b.while_loop(&["n"], |w| {
                // 3
                w.call("step"); // 4
                w.assign("n", &["n"]); // 5
            });
            b.print("total"); // 6
        })
        .procedure("step", |b| {
            b.if_else(
                &["n"], // 7
                |t| {
                    t.assign("total", &["total", "n"]); // 8
                },
                |e| {
                    e.call("log"); // 9
                },
            );
        })
        .procedure("log", |b| {
            b.print("total"); // 10
        })
        .build()
}
