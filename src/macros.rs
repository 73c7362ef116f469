//! Declarative entry table.
//!
//! ```ignore
//! let registry = remote_control_table! {
//!     Device;
//!     object led: Led => (brightness, set_brightness);   // id 0
//!     direct counter: u16;                                // id 1
//!     functions (fan_speed, set_fan_speed);               // id 2
//!     action reboot;                                      // id 3
//! }?;
//! ```
//!
//! Entry forms, each terminated by `;`:
//!
//! | Form                                     | Descriptor                    |
//! |------------------------------------------|-------------------------------|
//! | `object f: T => (get, set)`              | `ObjectAccessorPair`          |
//! | `object f: T => (get, set) as V`         | same, declared type `V`       |
//! | `object f: T => (get g)` / `(set s)`     | half pair (fails to build)    |
//! | `object f: T => unit(get, set)`          | `ObjectUnitPair`              |
//! | `direct f: V`                            | `DirectVariable`              |
//! | `functions (get, set)` / `... as V`      | `GlobalFunctionPair`          |
//! | `functions unit(get, set)`               | `GlobalUnitPair`              |
//! | `action path`                            | `NoArgAction`                 |
//!
//! `f` names a field of the context type; getters and setters are methods
//! of `T`; free functions and actions are paths. Ids follow declaration
//! order. Expands to `RegistryBuilder::build()`, so the result is a
//! `Result<Registry<Ctx>>`.

#[macro_export]
macro_rules! remote_control_table {
    (@entries $ctx:ty; $b:expr; ) => {
        $b.build()
    };

    // ── object accessor pairs ────────────────────────────────────
    (@entries $ctx:ty; $b:expr;
        object $field:ident : $obj:ty => unit($get:ident, $set:ident); $($rest:tt)*) => {
        $crate::remote_control_table!(@entries $ctx; $b.entry(
            $crate::entry::access::ObjectUnitPair::new(
                stringify!($field),
                $crate::remote_control_table!(@project $ctx, $field, $obj),
                (stringify!($get), <$obj>::$get),
                (stringify!($set), <$obj>::$set),
            )
        ); $($rest)*)
    };
    (@entries $ctx:ty; $b:expr;
        object $field:ident : $obj:ty => (get $get:ident); $($rest:tt)*) => {
        $crate::remote_control_table!(@entries $ctx; $b.entry(
            $crate::entry::access::ObjectAccessorPair::getter_only(
                stringify!($field),
                $crate::remote_control_table!(@project $ctx, $field, $obj),
                (stringify!($get), <$obj>::$get),
            )
        ); $($rest)*)
    };
    (@entries $ctx:ty; $b:expr;
        object $field:ident : $obj:ty => (set $set:ident); $($rest:tt)*) => {
        $crate::remote_control_table!(@entries $ctx; $b.entry(
            $crate::entry::access::ObjectAccessorPair::setter_only(
                stringify!($field),
                $crate::remote_control_table!(@project $ctx, $field, $obj),
                (stringify!($set), <$obj>::$set),
            )
        ); $($rest)*)
    };
    (@entries $ctx:ty; $b:expr;
        object $field:ident : $obj:ty => ($get:ident, $set:ident) as $v:ty; $($rest:tt)*) => {
        $crate::remote_control_table!(@entries $ctx; $b.entry(
            $crate::entry::access::ObjectAccessorPair::new(
                stringify!($field),
                $crate::remote_control_table!(@project $ctx, $field, $obj),
                (stringify!($get), <$obj>::$get),
                (stringify!($set), <$obj>::$set),
            )
            .declare::<$v>()
        ); $($rest)*)
    };
    (@entries $ctx:ty; $b:expr;
        object $field:ident : $obj:ty => ($get:ident, $set:ident); $($rest:tt)*) => {
        $crate::remote_control_table!(@entries $ctx; $b.entry(
            $crate::entry::access::ObjectAccessorPair::new(
                stringify!($field),
                $crate::remote_control_table!(@project $ctx, $field, $obj),
                (stringify!($get), <$obj>::$get),
                (stringify!($set), <$obj>::$set),
            )
        ); $($rest)*)
    };

    // ── direct cells ─────────────────────────────────────────────
    (@entries $ctx:ty; $b:expr; direct $field:ident : $v:ty; $($rest:tt)*) => {
        $crate::remote_control_table!(@entries $ctx; $b.entry(
            $crate::entry::access::DirectVariable::new(
                stringify!($field),
                $crate::remote_control_table!(@project $ctx, $field, $v),
            )
        ); $($rest)*)
    };

    // ── free functions ───────────────────────────────────────────
    (@entries $ctx:ty; $b:expr; functions unit($get:path, $set:path); $($rest:tt)*) => {
        $crate::remote_control_table!(@entries $ctx; $b.entry(
            $crate::entry::access::GlobalUnitPair::new(
                (stringify!($get), $get),
                (stringify!($set), $set),
            )
        ); $($rest)*)
    };
    (@entries $ctx:ty; $b:expr; functions ($get:path, $set:path) as $v:ty; $($rest:tt)*) => {
        $crate::remote_control_table!(@entries $ctx; $b.entry(
            $crate::entry::access::GlobalFunctionPair::new(
                (stringify!($get), $get),
                (stringify!($set), $set),
            )
            .declare::<$v>()
        ); $($rest)*)
    };
    (@entries $ctx:ty; $b:expr; functions ($get:path, $set:path); $($rest:tt)*) => {
        $crate::remote_control_table!(@entries $ctx; $b.entry(
            $crate::entry::access::GlobalFunctionPair::new(
                (stringify!($get), $get),
                (stringify!($set), $set),
            )
        ); $($rest)*)
    };

    // ── actions ──────────────────────────────────────────────────
    (@entries $ctx:ty; $b:expr; action $act:path; $($rest:tt)*) => {
        $crate::remote_control_table!(@entries $ctx; $b.entry(
            $crate::entry::access::NoArgAction::<$ctx>::new(stringify!($act), $act)
        ); $($rest)*)
    };

    // Field projection `fn(&mut Ctx) -> &mut T`.
    (@project $ctx:ty, $field:ident, $t:ty) => {{
        fn project(ctx: &mut $ctx) -> &mut $t {
            &mut ctx.$field
        }
        project
    }};

    ($ctx:ty; $($rest:tt)*) => {
        $crate::remote_control_table!(
            @entries $ctx; $crate::dispatch::RegistryBuilder::<$ctx>::new(); $($rest)*
        )
    };
}
