//! Demonstration programs.

/// A named lispython program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub name: &'static str,
    pub source: &'static str,
}

pub const FUNCTIONS: Sample = Sample {
    name: "functions",
    source: r#"
(def test (x)
    (print "hi" (+ x 2))
)
(def mkthing (y)
    (if (>= y 16)
        ((return (/ 2 y)))
    )
    (return (* 2 y))
)
(test (mkthing 25))
"#,
};

pub const LOOPS: Sample = Sample {
    name: "loops",
    source: r#"
(= s 0)
(= m 1)
(for (i) (xrange 1 10)
    (= s (+ s i))
    (= m (* m i))
)
(print s m)
"#,
};

pub const LAMBDA: Sample = Sample {
    name: "lambda",
    source: r#"
((lambda (x) (* x x)) 4)
"#,
};

pub const CLASSES: Sample = Sample {
    name: "classes",
    source: r#"
(class Quak (object)
    (def __init__ (self x)
        (= self.x x)
    )
    (def quak (self)
        (return (* 2 self.x))
    )
)
(= q (Quak 4))
(print (q.quak))
"#,
};

/// A module carrying the coding declaration, meant to go through the
/// [`loader`](crate::loader).
pub const TAGGED_MODULE: Sample = Sample {
    name: "tagged_module",
    source: r#"# coding: lispython
(class MegaTest (object)
    (def __init__ (self a)
        (= self.items (range a (* a 2)))
    )
    (def inner_test (self)
        (= sq (lambda (x) (* x x)))
        (= bee (list))
        (for (i) self.items
            (bee.append (+ (sq i) (test_fun i 5)))
        )
        (return (sum bee))
    )
    (def test (self) (print (% "hello, world %d" (self.inner_test))) )
)
(def test_fun (a b)
    (if (> a b)
        ((print "greater")
         (return 1)
        )
        ((print "lesser") (return 0))
    )
)
(= megatest (MegaTest 4))
"#,
};

pub const SAMPLES: &[Sample] = &[FUNCTIONS, LOOPS, LAMBDA, CLASSES, TAGGED_MODULE];
