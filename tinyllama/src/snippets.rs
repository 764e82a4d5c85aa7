//! Canned completions and explanations, selected by keyword.

pub const QUICK_SORT: &str = r#"function quickSort(arr) {
  if (arr.length <= 1) {
    return arr;
  }

  const pivot = arr[Math.floor(arr.length / 2)];
  const left = arr.filter(x => x < pivot);
  const middle = arr.filter(x => x === pivot);
  const right = arr.filter(x => x > pivot);

  return [...quickSort(left), ...middle, ...quickSort(right)];
}"#;

pub const BINARY_SEARCH: &str = r#"function binarySearch(arr, target) {
  let left = 0;
  let right = arr.length - 1;

  while (left <= right) {
    const mid = Math.floor((left + right) / 2);

    if (arr[mid] === target) {
      return mid;
    } else if (arr[mid] < target) {
      left = mid + 1;
    } else {
      right = mid - 1;
    }
  }

  return -1; // Target not found
}"#;

pub const PROCESS_DATA: &str = r#"// Generated with TinyLlama
function processData(data) {
  // Validate input
  if (!data || !Array.isArray(data)) {
    throw new Error('Invalid input data');
  }

  // Process the data
  const results = data.map(item => {
    return {
      id: item.id,
      value: item.value * 2,
      processed: true
    };
  });

  return results;
}"#;

pub const SORT_EXPLANATION: &str = "This code implements a sorting algorithm. It works by comparing adjacent elements and swapping them if they are in the wrong order. This process is repeated until the entire array is sorted.";

pub const SEARCH_EXPLANATION: &str = "This code implements a search algorithm that looks for a specific value within a collection of data. It works by checking each element sequentially until the target value is found or the end of the collection is reached.";

pub const GENERIC_EXPLANATION: &str = "This code processes data by iterating through items in a collection and applying transformations to each item. It's a common pattern for data manipulation.";

/// Topic picked from the text. `sort` is checked before `search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Sort,
    Search,
    General,
}

impl Topic {
    pub fn detect(text: &str) -> Self {
        if text.contains("sort") {
            Topic::Sort
        } else if text.contains("search") {
            Topic::Search
        } else {
            Topic::General
        }
    }
}

pub fn completion_for(prompt: &str) -> &'static str {
    match Topic::detect(prompt) {
        Topic::Sort => QUICK_SORT,
        Topic::Search => BINARY_SEARCH,
        Topic::General => PROCESS_DATA,
    }
}

pub fn explanation_for(code: &str) -> &'static str {
    match Topic::detect(code) {
        Topic::Sort => SORT_EXPLANATION,
        Topic::Search => SEARCH_EXPLANATION,
        Topic::General => GENERIC_EXPLANATION,
    }
}
