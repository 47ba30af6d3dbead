// every combination picking one element from each list
// an empty list yields no combination, no lists yields one empty combination
pub fn cartesian_product<T>(vv: &[Vec<T>]) -> Vec<Vec<&T>> {
    if vv.iter().any(|v| v.is_empty()) {
        return vec![];
    }
    if vv.is_empty() {
        return vec![vec![]];
    }

    let lens: Vec<usize> = vv.iter().map(|l| l.len()).collect();
    let mut idxs = vec![0; vv.len()];
    let mut res = vec![];
    loop {
        res.push(idxs.iter().enumerate().map(|(i1, &i2)| &vv[i1][i2]).collect());

        // increment idxs from the last digit
        let mut i = idxs.len();
        loop {
            if i == 0 {
                return res;
            }
            i -= 1;
            if idxs[i] < lens[i] - 1 {
                idxs[i] += 1;
                break;
            }
            idxs[i] = 0;
        }
    }
}

#[test]
fn test_cartesian_product() {
    let vv = vec![vec![1, 2], vec![3], vec![4, 5]];
    let res: Vec<Vec<i32>> = cartesian_product(&vv)
        .into_iter()
        .map(|v| v.into_iter().copied().collect())
        .collect();
    assert_eq!(
        res,
        vec![vec![1, 3, 4], vec![1, 3, 5], vec![2, 3, 4], vec![2, 3, 5]]
    );

    let vv: Vec<Vec<i32>> = vec![vec![1], vec![]];
    assert!(cartesian_product(&vv).is_empty());
}
