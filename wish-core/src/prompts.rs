//! Story text for every stage of the wish.
//!
//! Messages are Markdown; the host decides how to render them.

/// Greeting shown before anything has happened.
pub fn welcome() -> String {
    format!(
        "**Welcome to the Christmas linear search game!** You are a kid on the night before Christmas.\n\n{}",
        ask_for_wish()
    )
}

/// Ask the user which gift they want.
pub fn ask_for_wish() -> String {
    r#"### What gift do you want Santa to bring you this Christmas?

Type the name of a gift below (for example: **Basketball**, **Lego Set**, or **Headphones**),
then click **`Save my wish`**."#
        .to_string()
}

/// The wish was empty.
pub fn empty_wish() -> String {
    r#"### Please enter your gift

You need to type the name of a gift before continuing."#
        .to_string()
}

/// The wish was saved; time for bed.
pub fn bedtime(wish: &str) -> String {
    format!(
        r#"### Okay, time for bed!

You told Santa you want **{wish}** this Christmas.

Now close your eyes and go to sleep...

_Click **`Go to sleep`** to fast-forward through the night._"#
    )
}

/// The night is over.
pub fn night_passes() -> String {
    r#"### The night passes...

The clock ticks forward, the snow falls outside, and Santa is busy visiting houses.

**Morning is here!** Let's see if Santa brought your gift.

_Click **`Wake up on Christmas morning`** to check under the tree._"#
        .to_string()
}

/// The presents are under the tree.
pub fn christmas_morning(wish: &str) -> String {
    format!(
        r#"### It's Christmas morning!

These are the presents under the tree.
In the next step, we'll use **linear search** to check them one by one
and see if Santa brought your **{wish}**.

**Linear search is perfect for this situation** because:
1. The number of gifts in an average household is not that many, usually a small number like 5-12.
2. The gifts are **unsorted**.

Click **`Start searching`** to begin the linear search!"#
    )
}

/// First screen of the search.
pub fn start_search(wish: &str, total: usize) -> String {
    format!(
        r#"### Ready to search!

Let's use **linear search** to find **{wish}**.

**Linear search is great to use here** because:
- The list of gifts is **small**. Most families only have 5-12 gifts under their tree.
- The gifts are **unsorted**.

Click **Step** to check each present one by one, starting from position [0].

**Total presents to check:** {total}"#
    )
}

/// Search rewound to the first present.
pub fn search_reset(wish: &str, total: usize) -> String {
    format!(
        r#"### Ready to search!

Let's use **linear search** to find **{wish}**.

Click **Step** to check each present one by one, starting from position [0].

**Total presents to check:** {total}"#
    )
}

/// One present inspected, not a match.
pub fn checking(index: usize, present: &str, wish: &str, total: usize) -> String {
    format!(
        r#"### Checking present [{index}]...

Current gift: **{present}**
Looking for: **{wish}**
Result: Not a match

**Progress:** Checked {checked} of {total} presents"#,
        checked = index + 1,
    )
}

/// The wish was under the tree.
pub fn found(wish: &str, index: usize) -> String {
    format!(
        r#"### Found it!

After using linear search to check the presents, we see that you are on the **nice list** and Santa brought your gift, hurray!

**{wish}** was found at position [{index}]!

**Linear search found your gift after checking {checked} present(s).**"#,
        checked = index + 1,
    )
}

/// Every present checked, no wish.
pub fn not_found(wish: &str, total: usize) -> String {
    format!(
        r#"### Not found

After using linear search and iterating through the entire list of presents, we see that you are on the **naughty list** and Santa didn't bring your gift.

We checked all {total} presents, but **{wish}** wasn't there.

**Linear search checked all {total} presents.**"#
    )
}
